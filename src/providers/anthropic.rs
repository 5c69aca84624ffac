use super::Message;
use super::Provider;
use super::Role;
use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use serde_json::json;

const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const VERSION: &str = "2023-06-01";

/// Anthropic messages API. The system message travels as a separate field,
/// everything else as alternating user/assistant turns.
pub struct Anthropic {
    client: reqwest::Client,
    model: String,
    key: String,
}

impl Anthropic {
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let key = std::env::var("ANTHROPIC_KEY")
            .context("ANTHROPIC_KEY environment variable is not set")?;
        Ok(Self {
            client: reqwest::Client::new(),
            model: model.into(),
            key,
        })
    }
}

#[async_trait::async_trait]
impl Provider for Anthropic {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let system = messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let conversation = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::Assistant => "assistant",
                        _ => "user",
                    },
                    "content": m.content,
                })
            })
            .collect::<Vec<_>>();
        let body = json!({
            "model": self.model,
            "system": system,
            "messages": conversation,
            "max_tokens": 1000,
        });
        let response = self
            .client
            .post(ENDPOINT)
            .header("x-api-key", &self.key)
            .header("anthropic-version", VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        response["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("anthropic response carried no text block"))
    }
}
