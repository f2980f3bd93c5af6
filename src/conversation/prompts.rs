// Prompt templates for the summary pipeline

use crate::claude::Message;

use super::summary::ConversationSummary;

pub const SUMMARY_SYSTEM_PROMPT: &str = "\
You maintain the long-term memory of a chat companion. \
You read conversations and answer only with a single JSON object, no prose.";

const SUMMARY_SCHEMA: &str = r#"{
  "topics": ["short topic", "..."],
  "user_facts": ["fact about the user", "..."],
  "emotional_tone": "one or two words",
  "relationship_notes": "one sentence about how the user relates to the companion",
  "key_moments": ["memorable moment", "..."]
}"#;

/// Render `messages` as `role: text` lines separated by blank lines
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt asking for a JSON summary of the last `window` messages
pub fn build_summary_prompt(messages: &[Message], window: usize) -> String {
    let start = messages.len().saturating_sub(window);
    let transcript = format_transcript(&messages[start..]);
    format!(
        "Summarize the conversation below between a user and their companion.\n\
         Capture what they talked about, what the user shared about themselves, \
         the emotional tone, and moments worth remembering.\n\n\
         Respond with JSON in exactly this shape:\n{SUMMARY_SCHEMA}\n\n\
         Conversation:\n{transcript}"
    )
}

/// Prompt asking the LLM to fold a new summary into an older one
pub fn build_merge_prompt(previous: &ConversationSummary, latest: &ConversationSummary) -> String {
    let previous = serde_json::to_string_pretty(previous).unwrap_or_default();
    let latest = serde_json::to_string_pretty(latest).unwrap_or_default();
    format!(
        "Merge these two memory summaries of the same relationship into one.\n\
         Keep every user fact that is still true, prefer the newer summary when \
         they conflict, drop duplicates, and keep each list to the most important items.\n\n\
         Older summary:\n{previous}\n\n\
         Newer summary:\n{latest}\n\n\
         Respond with JSON in exactly this shape:\n{SUMMARY_SCHEMA}"
    )
}

/// Prompt asking for the summary as a short paragraph for the system text
pub fn build_prose_prompt(summary: &ConversationSummary) -> String {
    let json = serde_json::to_string_pretty(summary).unwrap_or_default();
    format!(
        "Rewrite this memory summary as a short paragraph (at most 5 sentences) \
         written to the companion in second person, e.g. \"You and the user have been talking about...\". \
         Answer with the paragraph only.\n\n{json}"
    )
}
