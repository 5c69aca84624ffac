pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod scripted;

pub use anthropic::Anthropic;
pub use gemini::Gemini;
pub use openai::Completions;
pub use scripted::Scripted;

use crate::config::Backend;
use anyhow::Result;

/// Who said what, in provider-agnostic form. Providers map these onto their
/// own wire conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A decision provider: given a role-tagged transcript, produce one text
/// response. No format is promised; interpreting the response is entirely
/// the caller's problem. The orchestration core depends on this trait and
/// never on a concrete provider.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    async fn chat(&self, messages: &[Message]) -> Result<String>;
}

/// Resolve a configured binding to a live provider. Models default per
/// backend when the roster leaves them out.
pub fn bind(backend: Backend, model: Option<&str>) -> Result<Box<dyn Provider>> {
    Ok(match backend {
        Backend::Openai => Box::new(Completions::openai(
            model.unwrap_or("gpt-4o-mini"),
        )?),
        Backend::Grok => Box::new(Completions::xai(model.unwrap_or("grok-4"))?),
        Backend::Anthropic => Box::new(Anthropic::new(
            model.unwrap_or("claude-3-7-sonnet-latest"),
        )?),
        Backend::Gemini => Box::new(Gemini::new(model.unwrap_or("gemini-pro"))?),
        Backend::Folder => Box::new(Scripted::Folder),
        Backend::Caller => Box::new(Scripted::Caller),
        Backend::Raiser => Box::new(Scripted::Raiser),
    })
}
