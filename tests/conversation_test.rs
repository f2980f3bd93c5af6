// Integration tests for the conversation services through the public API

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use companion::claude::Message;
use companion::config::Companion;
use companion::conversation::{
    compose_system_prompt, ConversationMetrics, ConversationSummary, Engagement, Pace, Summarizer,
};
use companion::generators::Generator;

/// Replies from a script, recording the prompts it was given
struct ScriptedGenerator {
    replies: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, _: Option<&str>, messages: Vec<Message>, _: u32) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .extend(messages.into_iter().map(|m| m.content));
        self.replies
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn history(turns: usize, user_text: &str) -> Vec<Message> {
    (0..turns)
        .flat_map(|_| [Message::user(user_text), Message::assistant("Tell me more!")])
        .collect()
}

#[test]
fn test_metrics_over_full_history() {
    // 8 turns of 30-char user messages: exactly on the fast/moderate boundary
    let text = "a".repeat(30);
    let metrics = ConversationMetrics::compute(&history(8, &text));
    assert_eq!(metrics.message_count, 16);
    assert_eq!(metrics.avg_user_length, 30.0);
    assert_eq!(metrics.pace, Pace::Moderate);
    assert_eq!(metrics.engagement, Engagement::Medium);
}

#[tokio::test]
async fn test_refresh_cycle_summarize_merge_prose() {
    let generator = ScriptedGenerator::new(&[
        r#"{"topics":["guitar"],"user_facts":["learning guitar"]}"#,
        r#"```json
{"topics":["cooking","guitar"],"user_facts":["learning guitar","loves ramen"],"emotional_tone":"happy"}
```"#,
        "You and the user talk about guitar and cooking; they love ramen.",
    ]);
    let summarizer = Summarizer::new(generator.clone()).with_window(4);

    let messages = history(8, "I practiced guitar today");
    assert!(summarizer.is_due(&messages));

    let previous = ConversationSummary {
        topics: vec!["cooking".into()],
        user_facts: vec!["loves ramen".into()],
        ..Default::default()
    };

    let latest = summarizer.summarize(&messages).await;
    assert_eq!(latest.topics, vec!["guitar"]);

    let merged = summarizer.merge(&previous, latest).await;
    assert_eq!(merged.topics, vec!["cooking", "guitar"]);
    assert_eq!(merged.emotional_tone, "happy");

    let prose = summarizer.prose(&merged).await;
    assert!(prose.contains("ramen"));

    // Only the 4-message window reached the summary prompt
    let prompts = generator.prompts.lock().unwrap();
    let first = &prompts[0];
    assert_eq!(first.matches("user: I practiced guitar today").count(), 2);

    let ava = Companion::load_builtin("default").unwrap();
    let metrics = ConversationMetrics::compute(&messages);
    let system = compose_system_prompt(&ava.to_system_message(), &prose, Some(&metrics));
    assert!(system.starts_with("You are Ava"));
    assert!(system.contains("ramen"));
}
