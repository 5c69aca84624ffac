use super::Message;
use super::Provider;
use super::Role;
use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use serde_json::json;

/// Gemini generateContent client. The transcript flattens into one
/// role-tagged text block, the way the source drove this API.
pub struct Gemini {
    client: reqwest::Client,
    model: String,
    key: String,
}

impl Gemini {
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let key = std::env::var("GEMINI_KEY")
            .context("GEMINI_KEY environment variable is not set")?;
        Ok(Self {
            client: reqwest::Client::new(),
            model: model.into(),
            key,
        })
    }

    fn flatten(messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| {
                let tag = match m.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };
                format!("<{tag}>\n{}\n</{tag}>\n", m.content)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Provider for Gemini {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": Self::flatten(messages) }] }],
        });
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| anyhow!("gemini response carried no text part"))
    }
}
