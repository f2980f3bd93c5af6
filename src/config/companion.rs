// Companion personas
//
// A companion is the character the LLM role-plays. Built-ins ship with the
// binary; custom ones load from a TOML file with the same shape.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A companion defines who the LLM plays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Companion {
    /// Display name (e.g., "Ava", "Luna")
    pub name: String,

    /// One-line description shown in the picker
    pub description: String,

    /// System prompt that defines the character
    pub system_prompt: String,

    /// First message the companion sends
    #[serde(default)]
    pub greeting: String,

    /// Example exchanges appended to the system prompt
    #[serde(default)]
    pub examples: Vec<CompanionExample>,

    /// Tone (e.g., "Warm", "Playful")
    #[serde(default)]
    pub tone: String,
}

/// Example exchange for few-shot prompting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionExample {
    pub user: String,
    pub assistant: String,
}

impl Companion {
    /// Load companion from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read companion from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse companion TOML")
    }

    /// Load built-in companion by name
    pub fn load_builtin(name: &str) -> Result<Self> {
        let template = match name.to_ascii_lowercase().as_str() {
            "default" | "ava" => include_str!("../../data/companions/default.toml"),
            "luna" => include_str!("../../data/companions/luna.toml"),
            "kai" => include_str!("../../data/companions/kai.toml"),
            "sage" => include_str!("../../data/companions/sage.toml"),
            _ => anyhow::bail!("Unknown builtin companion: {}", name),
        };

        toml::from_str(template)
            .with_context(|| format!("Failed to parse builtin companion: {}", name))
    }

    /// Resolve a config value: built-in name first, then a file path
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        Self::load_builtin(name_or_path).or_else(|_| Self::load(Path::new(name_or_path)))
    }

    /// Get system prompt formatted for injection
    pub fn to_system_message(&self) -> String {
        if self.examples.is_empty() {
            self.system_prompt.clone()
        } else {
            let mut prompt = self.system_prompt.clone();
            prompt.push_str("\n\nExample exchanges:\n");
            for example in &self.examples {
                prompt.push_str(&format!(
                    "\nUser: {}\n{}: {}\n",
                    example.user, self.name, example.assistant
                ));
            }
            prompt
        }
    }

    /// List available builtin companions
    pub fn list_builtins() -> Vec<&'static str> {
        vec!["default", "luna", "kai", "sage"]
    }
}

impl Default for Companion {
    fn default() -> Self {
        Self {
            name: "Companion".to_string(),
            description: "Friendly chat companion".to_string(),
            system_prompt: "You are a friendly, caring companion. Keep the conversation warm and natural.".to_string(),
            greeting: "Hi there!".to_string(),
            examples: Vec::new(),
            tone: "Warm".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_companion() {
        let companion = Companion::default();
        assert!(!companion.system_prompt.is_empty());
    }

    #[test]
    fn test_builtin_companions() {
        for name in Companion::list_builtins() {
            let companion = Companion::load_builtin(name);
            assert!(companion.is_ok(), "Failed to load builtin companion: {}", name);
            assert!(!companion.unwrap().greeting.is_empty());
        }
    }

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        assert_eq!(Companion::load_builtin("Luna").unwrap().name, "Luna");
        assert_eq!(Companion::load_builtin("ava").unwrap().name, "Ava");
        assert!(Companion::load_builtin("nobody").is_err());
    }

    #[test]
    fn test_examples_are_appended_with_companion_name() {
        let kai = Companion::load_builtin("kai").unwrap();
        let message = kai.to_system_message();
        assert!(message.starts_with(&kai.system_prompt));
        assert!(message.contains("Kai: WAIT."), "{message}");
    }

    #[test]
    fn test_resolve_falls_back_to_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "name = \"Rex\"\ndescription = \"Test\"\nsystem_prompt = \"You are Rex.\""
        )
        .unwrap();
        let companion = Companion::resolve(file.path().to_str().unwrap()).unwrap();
        assert_eq!(companion.name, "Rex");
        assert_eq!(companion.to_system_message(), "You are Rex.");
    }
}
