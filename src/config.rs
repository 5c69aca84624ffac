use crate::Chips;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Which decision provider backs an agent. The scripted variants need no
/// credentials and exist for tests and offline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Openai,
    Anthropic,
    Gemini,
    Grok,
    Folder,
    Caller,
    Raiser,
}

/// One roster entry: a stable agent identity bound to a provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub provider: Backend,
    /// provider model override; each backend has a default
    #[serde(default)]
    pub model: Option<String>,
    /// per-agent override of the global reflection toggle
    #[serde(default)]
    pub reflection: Option<bool>,
}

/// Run configuration, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// hands to play
    pub rounds: u64,
    /// (small blind, big blind)
    pub blinds: (Chips, Chips),
    /// starting stack per agent
    pub stack: Chips,
    /// deck seed; omit for a different match every run
    pub seed: Option<u64>,
    /// let providers distill a reflection after each hand
    pub reflection: bool,
    /// narrate agent commentary
    pub monologue: bool,
    pub agents: Vec<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rounds: 10,
            blinds: (50, 100),
            stack: 10_000,
            seed: Some(42),
            reflection: false,
            monologue: true,
            agents: vec![
                Profile {
                    name: "Callie".to_string(),
                    provider: Backend::Caller,
                    model: None,
                    reflection: None,
                },
                Profile {
                    name: "Razor".to_string(),
                    provider: Backend::Raiser,
                    model: None,
                    reflection: None,
                },
            ],
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// fall back to the built-in scripted roster when no file is present,
    /// so the binary runs without credentials or setup
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{:#}; using the built-in scripted roster", e);
                Self::default()
            }
        }
    }
}
