//! Prompt templates for the remote analyzer.

use serde::Serialize;

/// System prompt for the chat-completions analyzer
pub const ANALYZER_SYSTEM_PROMPT: &str = r#"You are an expert psychological analyst AI. Your task is to analyze user posts and extract emotional metrics.
For each post provided, you must return a JSON object with the following fields:

1.  **sentimentScore** (number): A float between -1.0 (extremely negative) and 1.0 (extremely positive). 0 is neutral.
2.  **intensity** (number): An integer between 1 (low emotional charge) and 5 (explosive/high impact).
3.  **category** (string): One of the following EXACT values: 'daily', 'rant', 'reflection', 'achievement', 'relationship', 'other'.

**Category Definitions:**
- 'daily': Routine life updates, weather, food, commute.
- 'rant': Complaints, anger, frustration, venting.
- 'reflection': Deep thoughts, questions about life, self-realization.
- 'achievement': Success, finishing tasks, pride, winning.
- 'relationship': Mentions of friends, family, partners, love, social interactions.
- 'other': Anything that strictly doesn't fit above.

**Response Format:**
You must return your analysis as a strictly valid JSON array of objects, one per post, in the same order as the input. Do not include markdown code blocks. Just the raw JSON string.
Example:
[
  {"sentimentScore": 0.8, "intensity": 3, "category": "achievement"},
  {"sentimentScore": -0.5, "intensity": 4, "category": "rant"}
]"#;

#[derive(Serialize)]
struct PromptPost<'a> {
    id: usize,
    text: &'a str,
}

/// User message listing the batch as `[{"id": i, "text": ...}]`
pub fn analyzer_user_message<S: AsRef<str>>(lines: &[S]) -> serde_json::Result<String> {
    let posts: Vec<PromptPost<'_>> = lines
        .iter()
        .enumerate()
        .map(|(id, line)| PromptPost {
            id,
            text: line.as_ref(),
        })
        .collect();

    Ok(format!(
        "Analyze these posts:\n{}",
        serde_json::to_string(&posts)?
    ))
}
