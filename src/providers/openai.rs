use super::Message;
use super::Provider;
use super::Role;
use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use serde_json::json;

/// Chat-completions client. xAI exposes the same wire format on its own
/// host, so Grok is this client pointed at a different endpoint rather than
/// a second implementation.
pub struct Completions {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    key: String,
}

impl Completions {
    pub fn openai(model: impl Into<String>) -> Result<Self> {
        let key =
            std::env::var("OPENAI_KEY").context("OPENAI_KEY environment variable is not set")?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: model.into(),
            key,
        })
    }
    pub fn xai(model: impl Into<String>) -> Result<Self> {
        let key =
            std::env::var("XAI_API_KEY").context("XAI_API_KEY environment variable is not set")?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: "https://api.x.ai/v1/chat/completions".to_string(),
            model: model.into(),
            key,
        })
    }
}

#[async_trait::async_trait]
impl Provider for Completions {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let transcript = messages
            .iter()
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::System => "system",
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    "content": m.content,
                })
            })
            .collect::<Vec<_>>();
        let body = json!({
            "model": self.model,
            "messages": transcript,
            "temperature": 0.7,
            "max_tokens": 400,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| anyhow!("completions response carried no message content"))
    }
}
