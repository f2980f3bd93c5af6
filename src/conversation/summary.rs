// Conversation summary pipeline
//
// Every few turns the recent history is summarised by the LLM into a small
// JSON record, optionally merged with the previous record (again by the
// LLM), and rendered as prose for the companion's system text.
//
// None of these steps surface errors to the caller: a network failure or an
// unparseable reply yields the neutral default (summary) or a local rendering
// (prose), with a warning logged.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::claude::{Message, Role};
use crate::config::constants::{
    DEFAULT_SUMMARY_INTERVAL_TURNS, DEFAULT_SUMMARY_WINDOW, SUMMARY_MAX_TOKENS,
};
use crate::generators::Generator;

use super::prompts::{
    build_merge_prompt, build_prose_prompt, build_summary_prompt, SUMMARY_SYSTEM_PROMPT,
};

/// Upper bound on every list in a summary
pub const MAX_LIST_ITEMS: usize = 10;

const NEUTRAL_TONE: &str = "neutral";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationSummary {
    pub topics: Vec<String>,
    pub user_facts: Vec<String>,
    pub emotional_tone: String,
    pub relationship_notes: String,
    pub key_moments: Vec<String>,
}

impl Default for ConversationSummary {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            user_facts: Vec::new(),
            emotional_tone: NEUTRAL_TONE.to_string(),
            relationship_notes: String::new(),
            key_moments: Vec::new(),
        }
    }
}

impl ConversationSummary {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
            && self.user_facts.is_empty()
            && self.key_moments.is_empty()
            && self.relationship_notes.trim().is_empty()
    }

    /// Trim entries, drop blanks and duplicates, keep the last `MAX_LIST_ITEMS`
    pub fn normalized(mut self) -> Self {
        self.topics = cap_list(self.topics);
        self.user_facts = cap_list(self.user_facts);
        self.key_moments = cap_list(self.key_moments);
        self.relationship_notes = self.relationship_notes.trim().to_string();
        let tone = self.emotional_tone.trim();
        self.emotional_tone = if tone.is_empty() {
            NEUTRAL_TONE.to_string()
        } else {
            tone.to_string()
        };
        self
    }

    /// Deterministic paragraph used when the LLM prose step is unavailable
    pub fn to_prose(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut parts = Vec::new();
        if !self.topics.is_empty() {
            parts.push(format!(
                "You and the user have been talking about {}.",
                self.topics.join(", ")
            ));
        }
        if !self.user_facts.is_empty() {
            parts.push(format!(
                "Things you know about the user: {}.",
                self.user_facts.join("; ")
            ));
        }
        if self.emotional_tone != NEUTRAL_TONE {
            parts.push(format!("The mood lately has been {}.", self.emotional_tone));
        }
        if !self.relationship_notes.is_empty() {
            parts.push(self.relationship_notes.clone());
        }
        if !self.key_moments.is_empty() {
            parts.push(format!(
                "Moments worth remembering: {}.",
                self.key_moments.join("; ")
            ));
        }
        parts.join(" ")
    }
}

fn cap_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect();
    if out.len() > MAX_LIST_ITEMS {
        out.drain(..out.len() - MAX_LIST_ITEMS);
    }
    out
}

/// Parse an LLM reply into a summary, falling back to the default.
///
/// Tolerates code fences and chatter around the object by taking the span
/// from the first `{` to the last `}`.
pub fn parse_summary(text: &str) -> ConversationSummary {
    try_parse_summary(text).unwrap_or_default()
}

fn try_parse_summary(text: &str) -> Option<ConversationSummary> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<ConversationSummary>(&text[start..=end]) {
        Ok(summary) => Some(summary.normalized()),
        Err(e) => {
            tracing::debug!("Summary JSON did not parse: {e}");
            None
        }
    }
}

/// Number of completed turns (a user message directly answered by the assistant)
pub fn count_turns(messages: &[Message]) -> usize {
    messages
        .windows(2)
        .filter(|pair| pair[0].is_user() && pair[1].role == Role::Assistant)
        .count()
}

/// True when `turns` lands on a positive multiple of `interval`
pub fn should_refresh(turns: usize, interval: usize) -> bool {
    interval > 0 && turns > 0 && turns % interval == 0
}

/// Generates, merges and renders summaries through a [`Generator`]
pub struct Summarizer {
    generator: Arc<dyn Generator>,
    window: usize,
    interval: usize,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            window: DEFAULT_SUMMARY_WINDOW,
            interval: DEFAULT_SUMMARY_INTERVAL_TURNS,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Whether `messages` has just completed a refresh interval
    pub fn is_due(&self, messages: &[Message]) -> bool {
        should_refresh(count_turns(messages), self.interval)
    }

    /// Summarise the last `window` messages. Never fails.
    pub async fn summarize(&self, messages: &[Message]) -> ConversationSummary {
        if messages.is_empty() {
            return ConversationSummary::default();
        }

        let prompt = build_summary_prompt(messages, self.window);
        match self
            .generator
            .generate(
                Some(SUMMARY_SYSTEM_PROMPT),
                vec![Message::user(prompt)],
                SUMMARY_MAX_TOKENS,
            )
            .await
        {
            Ok(text) => parse_summary(&text),
            Err(e) => {
                tracing::warn!(
                    generator = self.generator.name(),
                    "Conversation summary failed, using defaults: {e}"
                );
                ConversationSummary::default()
            }
        }
    }

    /// Merge `latest` into `previous` via the LLM; falls back to `latest`.
    pub async fn merge(
        &self,
        previous: &ConversationSummary,
        latest: ConversationSummary,
    ) -> ConversationSummary {
        if previous.is_empty() {
            return latest.normalized();
        }
        if latest.is_empty() {
            return previous.clone().normalized();
        }

        let prompt = build_merge_prompt(previous, &latest);
        let reply = self
            .generator
            .generate(
                Some(SUMMARY_SYSTEM_PROMPT),
                vec![Message::user(prompt)],
                SUMMARY_MAX_TOKENS,
            )
            .await;

        match reply.map(|text| try_parse_summary(&text)) {
            Ok(Some(merged)) => merged,
            Ok(None) => {
                tracing::warn!("Summary merge returned unparseable JSON, keeping latest summary");
                latest.normalized()
            }
            Err(e) => {
                tracing::warn!("Summary merge failed, keeping latest summary: {e}");
                latest.normalized()
            }
        }
    }

    /// Render `summary` as a paragraph for the system prompt
    pub async fn prose(&self, summary: &ConversationSummary) -> String {
        if summary.is_empty() {
            return String::new();
        }

        let prompt = build_prose_prompt(summary);
        match self
            .generator
            .generate(None, vec![Message::user(prompt)], SUMMARY_MAX_TOKENS)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => summary.to_prose(),
            Err(e) => {
                tracing::warn!("Summary prose failed, rendering locally: {e}");
                summary.to_prose()
            }
        }
    }
}
