// Companion - chat companion backend
// Library exports

pub mod billing;
pub mod claude;
pub mod config;
pub mod conversation;
pub mod generators;
pub mod logging;
pub mod server;
