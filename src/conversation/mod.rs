// Conversation services: engagement metrics, memory summaries, system text

pub mod metrics;
pub mod prompts;
pub mod summary;
mod system_prompt;

pub use metrics::{ConversationMetrics, Engagement, Pace};
pub use summary::{count_turns, parse_summary, should_refresh, ConversationSummary, Summarizer};
pub use system_prompt::compose_system_prompt;
