//! # Mindscape-Engine
//!
//! Runtime around the pure analysis and layout crates: configuration,
//! batch ingestion with a remote analyzer and rule-based fallback,
//! persistence and the persona session.
//!
//! ## Modules
//!
//! | Module      | Role                                              |
//! |-------------|---------------------------------------------------|
//! | `config`    | `EngineConfig` from file and `MINDSCAPE_*` env    |
//! | `prompts`   | Chat prompt for the remote analyzer               |
//! | `remote`    | `ExternalAnalyzer` trait, chat-completions client |
//! | `ingest`    | `Ingestor`, `BatchReport`                         |
//! | `store`     | `MemoryStore`, in-memory and JSON file stores     |
//! | `session`   | `PersonaSession`                                  |
//! | `telemetry` | tracing subscriber setup                          |

pub mod config;
pub mod ingest;
pub mod prompts;
pub mod remote;
pub mod session;
pub mod store;
pub mod telemetry;

pub use config::*;
pub use ingest::*;
pub use remote::*;
pub use session::*;
pub use store::*;
pub use telemetry::init_tracing;
