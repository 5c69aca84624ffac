use super::memory::Memory;
use super::summary;
use crate::play::LegalMoves;
use crate::play::Observation;
use crate::providers::Message;
use crate::providers::Provider;
use crate::run::record::RoundRecord;
use crate::Chips;
use crate::Position;
use anyhow::Result;
use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

/// Behavioral instructions every agent starts from unless the roster
/// overrides them.
pub const DEFAULT_INSTRUCTIONS: &str = "You are a seasoned and experienced No limit Texas Holdem poker player, evaluating the current game state and making the decision to fold, check, call, or raise to win as much money as possible.\nResponse format: Output must be: <action>[optional integer]@<brief reason>. No other characters, no markdown. If you're raising, the optional integer range will be provided to you in the legal tokens. Explain your thinking but separate it from the token with a preceding '@' symbol.\nYou can maintain notes about your observations of the game. These notes will be shown to you in each decision to help you adapt your strategy over time. Add useful information about your opponent's tendencies, your own statistics, and reminders of effective strategies.";

const REFLECTION_INSTRUCTIONS: &str = "You are reviewing your own play between hands of a No limit Texas Holdem session. Be concrete and brief.";

/// Per-position decision tally for one agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggression {
    pub decisions: usize,
    pub raises: usize,
}

/// One persistent participant: stable identity, bankroll, provider binding,
/// and everything it remembers. Lives for the whole match. Mutation funnels
/// through the round boundary (`absorb`, `set_stack`) and the counters the
/// orchestrator feeds per turn; turn-context assembly never writes.
pub struct Agent {
    name: String,
    stack: Chips,
    initial: Chips,
    provider: Box<dyn Provider>,
    memory: Memory,
    history: Vec<RoundRecord>,
    outcomes: Vec<i64>,
    aggression: BTreeMap<String, Aggression>,
    latencies: Vec<Duration>,
    illegal: usize,
    reflects: bool,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        provider: Box<dyn Provider>,
        stack: Chips,
        reflects: bool,
        instructions: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            stack,
            initial: stack,
            provider,
            memory: Memory::new(instructions.unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string())),
            history: Vec::new(),
            outcomes: Vec::new(),
            aggression: BTreeMap::new(),
            latencies: Vec::new(),
            illegal: 0,
            reflects,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn initial(&self) -> Chips {
        self.initial
    }
    pub fn profit(&self) -> i64 {
        self.stack as i64 - self.initial as i64
    }
    pub fn notes(&self) -> &str {
        self.memory.notes()
    }
    pub fn memory(&self) -> &Memory {
        &self.memory
    }
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }
    pub fn illegal(&self) -> usize {
        self.illegal
    }
    pub fn aggression(&self) -> &BTreeMap<String, Aggression> {
        &self.aggression
    }
    pub fn mean_latency(&self) -> Duration {
        match self.latencies.len() {
            0 => Duration::ZERO,
            n => self.latencies.iter().sum::<Duration>() / n as u32,
        }
    }

    /// ask the provider for this turn's move; the raw text comes back
    /// untouched for the interpreter to judge
    pub async fn decide(&mut self, observation: &Observation, legal: &LegalMoves) -> Result<String> {
        let prompt = Message::user(self.prompt(observation, legal)?);
        let standing = self.standing();
        let mut messages = self.memory.context(&standing);
        messages.push(prompt.clone());
        let clock = Instant::now();
        let raw = self.provider.chat(&messages).await?;
        self.latencies.push(clock.elapsed());
        self.memory.remember(prompt, Message::assistant(raw.clone()));
        Ok(raw)
    }

    /// per-turn bookkeeping from the orchestrator, post-interpretation
    pub fn track(&mut self, position: &str, raised: bool) {
        let tally = self.aggression.entry(position.to_string()).or_default();
        tally.decisions += 1;
        if raised {
            tally.raises += 1;
        }
    }
    pub fn mark_illegal(&mut self) {
        self.illegal += 1;
    }
    pub fn annotate(&mut self, notes: &str) {
        self.memory.annotate(notes);
    }

    /// stack settlement at round end; the only other writer is `absorb`
    pub fn set_stack(&mut self, stack: Chips) {
        self.stack = stack;
    }

    /// round-boundary memory transition: render and admit the summary,
    /// optionally distill a reflection, close the round's transcript
    pub async fn absorb(&mut self, record: &RoundRecord, seat: Position) {
        let summary = summary::render(record, seat);
        let reflection = match self.reflects {
            true => self.reflect(record.id, &summary).await,
            false => None,
        };
        self.memory
            .conclude(summary, reflection.map(|text| (record.id, text)));
        self.outcomes.push(record.profit(seat));
        self.history.push(record.clone());
    }

    async fn reflect(&mut self, round: u64, summary: &str) -> Option<String> {
        let messages = vec![
            Message::system(REFLECTION_INSTRUCTIONS),
            Message::user(format!(
                "Hand #{} played out as follows:\n{}\n\nIn two or three sentences, what lesson do you carry into the next hand?",
                round, summary
            )),
        ];
        match self.provider.chat(&messages).await {
            Ok(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                log::debug!("[{}] reflection skipped: {:#}", self.name, e);
                None
            }
        }
    }

    fn standing(&self) -> String {
        match self.outcomes.len() {
            0 => String::new(),
            played => format!(
                "Hands won: {} of {}.",
                self.outcomes.iter().filter(|p| **p > 0).count(),
                played
            ),
        }
    }

    /// the provider-facing user prompt: projected state (with notes and the
    /// notes affordance spliced in), the legal vocabulary, and the standing
    /// instruction about note updates
    fn prompt(&self, observation: &Observation, legal: &LegalMoves) -> Result<String> {
        let mut state = serde_json::to_value(observation)?;
        state["notes"] = serde_json::json!(self.memory.notes());
        state["can_update_notes"] = serde_json::json!(true);
        Ok(serde_json::json!({
            "state": state,
            "legal": legal.tokens(),
            "instructions": "You can update your notes by including a line starting with 'NOTES:' after your action and commentary.",
        })
        .to_string())
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("stack", &self.stack)
            .field("rounds", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::play::view;
    use crate::providers::Scripted;
    use crate::table::Holdem;

    fn caller() -> Agent {
        Agent::new("Callie", Box::new(Scripted::Caller), 10_000, false, None)
    }

    #[tokio::test]
    async fn decide_round_trips_through_the_provider() {
        let table = Holdem::deal(&[10_000, 10_000], (50, 100), Deck::seeded(3)).unwrap();
        let observation = view::project(&table, 0);
        let legal = LegalMoves::derive(&table);
        let mut agent = caller();
        let raw = agent.decide(&observation, &legal).await.unwrap();
        assert!(raw.starts_with("call@"));
        assert!(agent.mean_latency() >= Duration::ZERO);
    }

    #[test]
    fn aggression_tallied_per_position() {
        let mut agent = caller();
        agent.track("Button", true);
        agent.track("Button", false);
        agent.track("Big Blind", false);
        assert_eq!(agent.aggression()["Button"].decisions, 2);
        assert_eq!(agent.aggression()["Button"].raises, 1);
        assert_eq!(agent.aggression()["Big Blind"].raises, 0);
    }

    #[test]
    fn profit_tracks_the_stack() {
        let mut agent = caller();
        agent.set_stack(10_050);
        assert_eq!(agent.profit(), 50);
        agent.set_stack(9_000);
        assert_eq!(agent.profit(), -1_000);
    }
}
