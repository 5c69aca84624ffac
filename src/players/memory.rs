use crate::providers::Message;
use std::collections::VecDeque;

/// How many round summaries survive eviction. Everything older lives on
/// only through notes and reflections.
pub const SUMMARY_CAPACITY: usize = 5;

/// An agent's cross-round memory and current-round transcript.
///
/// Two transition points and no others touch this: `context` (read-only,
/// every turn) and `conclude` (the one writer, at round end). Completed
/// rounds never re-enter the live transcript verbatim; only their bounded
/// summaries, reflections, and the running notes carry forward, which is
/// what keeps context size flat over arbitrarily long matches.
#[derive(Debug)]
pub struct Memory {
    instructions: String,
    summaries: VecDeque<String>,
    reflections: Vec<(u64, String)>,
    notes: String,
    exchange: Vec<Message>,
}

impl Memory {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            summaries: VecDeque::with_capacity(SUMMARY_CAPACITY + 1),
            reflections: Vec::new(),
            notes: String::new(),
            exchange: Vec::new(),
        }
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
    pub fn summaries(&self) -> impl Iterator<Item = &String> {
        self.summaries.iter()
    }
    pub fn reflections(&self) -> &[(u64, String)] {
        &self.reflections
    }

    /// assemble the turn context: behavioral instructions, the distilled
    /// memory block, then the current round's live exchange. The caller
    /// appends the new prompt itself.
    pub fn context(&self, standing: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.exchange.len() + 2);
        messages.push(Message::system(&self.instructions));
        if let Some(block) = self.remembrance(standing) {
            messages.push(Message::user(block));
        }
        messages.extend(self.exchange.iter().cloned());
        messages
    }

    /// record one prompt/response pair of the round in progress
    pub fn remember(&mut self, prompt: Message, response: Message) {
        self.exchange.push(prompt);
        self.exchange.push(response);
    }

    /// append-only notes; nothing ever edits in place
    pub fn annotate(&mut self, addition: &str) {
        if addition.is_empty() {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(addition);
    }

    /// round-end transition: admit the new summary (evicting the oldest
    /// past capacity), file the reflection under its round, and drop the
    /// live exchange
    pub fn conclude(&mut self, summary: String, reflection: Option<(u64, String)>) {
        self.summaries.push_back(summary);
        while self.summaries.len() > SUMMARY_CAPACITY {
            self.summaries.pop_front();
        }
        if let Some(entry) = reflection {
            self.reflections.push(entry);
        }
        self.exchange.clear();
    }

    fn remembrance(&self, standing: &str) -> Option<String> {
        let mut block = String::new();
        if !self.summaries.is_empty() {
            block.push_str("Recent hands:\n");
            for summary in self.summaries.iter() {
                block.push_str(summary);
                block.push('\n');
            }
        }
        for (round, reflection) in self.reflections.iter() {
            block.push_str(&format!("Reflection on hand #{}: {}\n", round, reflection));
        }
        if !self.notes.is_empty() {
            block.push_str(&format!("Your current notes:\n{}\n", self.notes));
        }
        if !standing.is_empty() {
            block.push_str(standing);
        }
        match block.is_empty() {
            true => None,
            false => Some(block),
        }
    }
}
