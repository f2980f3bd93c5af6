// Anthropic Messages API client and wire types

mod client;
mod types;

pub use client::{ClaudeClient, CLAUDE_API_URL};
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse, Role};
