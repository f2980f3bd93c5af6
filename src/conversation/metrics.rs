// Conversation metrics: pace and engagement heuristics
//
// Pure function over a message slice. Lengths are counted in characters,
// questions are `?` occurrences in user messages.

use serde::{Deserialize, Serialize};

use crate::claude::Message;

/// Fast pace needs the mean user length below this...
pub const FAST_PACE_MAX_USER_LEN: f64 = 30.0;
/// ...and the mean assistant length below this
pub const FAST_PACE_MAX_ASSISTANT_LEN: f64 = 80.0;
/// Mean user length at or above this is a slow pace
pub const SLOW_PACE_MIN_USER_LEN: f64 = 80.0;
/// Mean user length at or above this counts as high engagement
pub const HIGH_ENGAGEMENT_MIN_LEN: f64 = 80.0;
/// Questions per user message at or above this counts as high engagement
pub const HIGH_ENGAGEMENT_QUESTION_RATIO: f64 = 0.5;
/// Mean user length below this with no questions is low engagement
pub const LOW_ENGAGEMENT_MAX_LEN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Fast,
    Moderate,
    Slow,
}

impl Pace {
    /// Fast is short messages on both sides; slow is long user messages.
    pub fn classify(avg_user_length: f64, avg_assistant_length: f64) -> Self {
        if avg_user_length < FAST_PACE_MAX_USER_LEN
            && avg_assistant_length < FAST_PACE_MAX_ASSISTANT_LEN
        {
            Pace::Fast
        } else if avg_user_length >= SLOW_PACE_MIN_USER_LEN {
            Pace::Slow
        } else {
            Pace::Moderate
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engagement {
    Low,
    Medium,
    High,
}

impl Engagement {
    pub fn classify(avg_user_length: f64, question_count: usize, user_messages: usize) -> Self {
        let ratio = if user_messages == 0 {
            0.0
        } else {
            question_count as f64 / user_messages as f64
        };

        if avg_user_length >= HIGH_ENGAGEMENT_MIN_LEN || ratio >= HIGH_ENGAGEMENT_QUESTION_RATIO {
            Engagement::High
        } else if avg_user_length < LOW_ENGAGEMENT_MAX_LEN && question_count == 0 {
            Engagement::Low
        } else {
            Engagement::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMetrics {
    pub message_count: usize,
    pub user_message_count: usize,
    pub assistant_message_count: usize,
    pub avg_user_length: f64,
    pub avg_assistant_length: f64,
    pub question_count: usize,
    pub pace: Pace,
    pub engagement: Engagement,
}

impl Default for ConversationMetrics {
    fn default() -> Self {
        Self {
            message_count: 0,
            user_message_count: 0,
            assistant_message_count: 0,
            avg_user_length: 0.0,
            avg_assistant_length: 0.0,
            question_count: 0,
            pace: Pace::Moderate,
            engagement: Engagement::Medium,
        }
    }
}

impl ConversationMetrics {
    pub fn compute(messages: &[Message]) -> Self {
        let (user, assistant): (Vec<&Message>, Vec<&Message>) =
            messages.iter().partition(|m| m.is_user());

        if user.is_empty() {
            return Self {
                message_count: messages.len(),
                assistant_message_count: assistant.len(),
                avg_assistant_length: mean_length(&assistant),
                ..Self::default()
            };
        }

        let avg_user_length = mean_length(&user);
        let avg_assistant_length = mean_length(&assistant);
        let question_count: usize = user.iter().map(|m| m.content.matches('?').count()).sum();

        Self {
            message_count: messages.len(),
            user_message_count: user.len(),
            assistant_message_count: assistant.len(),
            avg_user_length,
            avg_assistant_length,
            question_count,
            pace: Pace::classify(avg_user_length, avg_assistant_length),
            engagement: Engagement::classify(avg_user_length, question_count, user.len()),
        }
    }

    /// One sentence of reply-style guidance for the companion's system text
    pub fn prompt_guidance(&self) -> String {
        let pace = match self.pace {
            Pace::Fast => "The user is sending short, quick messages; keep replies brief and snappy.",
            Pace::Moderate => "The user writes at a relaxed pace; match their message length.",
            Pace::Slow => "The user writes long, thoughtful messages; reply with depth and detail.",
        };
        let engagement = match self.engagement {
            Engagement::Low => " Engagement is low; ask an inviting question to draw them in.",
            Engagement::Medium => "",
            Engagement::High => " They are highly engaged; follow their curiosity.",
        };
        format!("{pace}{engagement}")
    }
}

fn mean_length(messages: &[&Message]) -> f64 {
    if messages.is_empty() {
        return 0.0;
    }
    let total: usize = messages.iter().map(|m| m.content.chars().count()).sum();
    total as f64 / messages.len() as f64
}
