// Configuration module
// Public interface for configuration loading

pub mod companion;
pub mod constants;
mod loader;
mod settings;

pub use companion::{Companion, CompanionExample};
pub use loader::{apply_env_overrides, default_config_path, load_config, load_config_from};
pub use settings::{
    AnthropicConfig, Config, ConversationConfig, PriceConfig, ServerConfig, StripeConfig,
};
