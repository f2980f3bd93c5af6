// System text assembly for the next chat call

use super::metrics::ConversationMetrics;

/// Join the companion prompt with memory prose and style guidance.
///
/// Empty sections are left out entirely so a fresh conversation gets the
/// companion prompt unchanged.
pub fn compose_system_prompt(
    companion_prompt: &str,
    summary_prose: &str,
    metrics: Option<&ConversationMetrics>,
) -> String {
    let mut sections = vec![companion_prompt.trim().to_string()];

    let prose = summary_prose.trim();
    if !prose.is_empty() {
        sections.push(format!("What you remember so far:\n{prose}"));
    }

    if let Some(metrics) = metrics.filter(|m| m.user_message_count > 0) {
        sections.push(format!("Conversation style:\n{}", metrics.prompt_guidance()));
    }

    sections.retain(|s| !s.is_empty());
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude::Message;

    #[test]
    fn test_fresh_conversation_keeps_prompt_unchanged() {
        let metrics = ConversationMetrics::compute(&[]);
        assert_eq!(
            compose_system_prompt("You are Mia.", "", Some(&metrics)),
            "You are Mia."
        );
    }

    #[test]
    fn test_memory_and_guidance_are_appended_in_order() {
        let metrics = ConversationMetrics::compute(&[Message::user("hi")]);
        let prompt = compose_system_prompt("You are Mia.", "You talked about cats.", Some(&metrics));
        let memory = prompt.find("What you remember").unwrap();
        let style = prompt.find("Conversation style").unwrap();
        assert!(prompt.starts_with("You are Mia."));
        assert!(memory < style);
        assert!(prompt.contains("You talked about cats."));
    }
}
