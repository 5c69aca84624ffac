use super::Message;
use super::Provider;
use super::Role;
use anyhow::Result;

/// Deterministic decision providers. They answer by peeking at the state
/// block of the latest prompt, the same way the source's callbox bot did,
/// and speak the same `token@reason` dialect as the real providers so the
/// whole interpretation path stays exercised.
#[derive(Debug, Clone, Copy)]
pub enum Scripted {
    /// folds whenever folding is on offer, checks otherwise
    Folder,
    /// calls any bet, checks when owed nothing
    Caller,
    /// raises the minimum whenever raising is open, otherwise calls
    Raiser,
}

impl Scripted {
    /// state block of the most recent user prompt
    fn peek(messages: &[Message]) -> serde_json::Value {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .and_then(|m| serde_json::from_str::<serde_json::Value>(&m.content).ok())
            .map(|prompt| prompt["state"].clone())
            .unwrap_or_default()
    }
    fn to_call(state: &serde_json::Value) -> u64 {
        state["to_call"].as_u64().unwrap_or(0)
    }
    /// None when the engine reported "Cannot Raise"
    fn min_raise(state: &serde_json::Value) -> Option<u64> {
        state["min_raise_to"].as_u64()
    }
    fn call_or_check(state: &serde_json::Value) -> String {
        match Self::to_call(state) {
            0 => "check@nothing to call".to_string(),
            owed => format!("call@calling {} on script", owed),
        }
    }
}

#[async_trait::async_trait]
impl Provider for Scripted {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let state = Self::peek(messages);
        Ok(match self {
            Scripted::Folder => match Self::to_call(&state) {
                0 => "check@nothing to fold against".to_string(),
                _ => "fold@folding every hand".to_string(),
            },
            Scripted::Caller => Self::call_or_check(&state),
            Scripted::Raiser => match Self::min_raise(&state) {
                Some(min) => format!("raise_to:{}@applying pressure", min),
                None => Self::call_or_check(&state),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(state: serde_json::Value) -> Vec<Message> {
        vec![
            Message::system("instructions"),
            Message::user(serde_json::json!({ "state": state, "legal": [] }).to_string()),
        ]
    }

    #[tokio::test]
    async fn caller_checks_when_unowed() {
        let messages = prompt(serde_json::json!({ "to_call": 0 }));
        let said = Scripted::Caller.chat(&messages).await.unwrap();
        assert!(said.starts_with("check@"));
    }

    #[tokio::test]
    async fn caller_calls_when_owed() {
        let messages = prompt(serde_json::json!({ "to_call": 50 }));
        let said = Scripted::Caller.chat(&messages).await.unwrap();
        assert!(said.starts_with("call@"));
    }

    #[tokio::test]
    async fn raiser_respects_the_sentinel() {
        let open = prompt(serde_json::json!({ "to_call": 50, "min_raise_to": 200 }));
        let shut = prompt(serde_json::json!({ "to_call": 50, "min_raise_to": "Cannot Raise" }));
        assert_eq!(
            Scripted::Raiser.chat(&open).await.unwrap(),
            "raise_to:200@applying pressure"
        );
        assert!(Scripted::Raiser.chat(&shut).await.unwrap().starts_with("call@"));
    }

    #[tokio::test]
    async fn folder_folds_facing_a_bet() {
        let messages = prompt(serde_json::json!({ "to_call": 100 }));
        let said = Scripted::Folder.chat(&messages).await.unwrap();
        assert!(said.starts_with("fold@"));
    }
}
