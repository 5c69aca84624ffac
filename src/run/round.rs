use super::record::RoundRecord;
use super::record::TurnRecord;
use crate::play::interpret::interpret;
use crate::play::rotation;
use crate::play::view;
use crate::play::LegalMoves;
use crate::play::MoveToken;
use crate::players::Agent;
use crate::table::Table;
use anyhow::Result;

/// Drives exactly one round start to finish, then is discarded.
///
/// A table arrives already built (a bad build never reaches here). Each loop
/// iteration dispatches the one pending seat's decision, interprets it,
/// applies it, and settlement falls out when the engine stops naming an
/// actor. One outstanding decision at a time, ever; the `await` inside the
/// loop is the only suspension point.
pub struct Round<T: Table> {
    id: u64,
    offset: usize,
    table: T,
    monologue: bool,
    narrated: usize,
}

impl<T: Table> Round<T> {
    pub fn new(id: u64, offset: usize, table: T, monologue: bool) -> Self {
        Self {
            id,
            offset,
            table,
            monologue,
            narrated: 0,
        }
    }

    pub async fn play(mut self, agents: &mut [Agent]) -> Result<RoundRecord> {
        let k = self.table.seats();
        let starting = self.table.stacks();
        self.introduce(agents);
        self.narrate();
        let mut turns = Vec::new();
        while let Some(seat) = self.table.actor() {
            let agent = rotation::seat_to_agent(seat, self.offset, k);
            let street = self.table.street();
            let observation = view::project(&self.table, seat);
            let legal = LegalMoves::derive(&self.table);
            let raw = match agents[agent].decide(&observation, &legal).await {
                Ok(raw) => raw,
                Err(e) => {
                    // provider failure forces a fold and the round goes on
                    log::warn!(
                        "[hand {}] provider for {} failed, forced fold: {:#}",
                        self.id,
                        agents[agent].name(),
                        e
                    );
                    agents[agent].mark_illegal();
                    self.table.fold()?;
                    turns.push(TurnRecord {
                        seat,
                        street,
                        action: MoveToken::Fold,
                        commentary: String::new(),
                    });
                    self.narrate();
                    continue;
                }
            };
            let reading = interpret(&raw, &legal);
            if self.monologue && !reading.commentary.is_empty() {
                log::info!(
                    "[hand {}] {}: {}",
                    self.id,
                    agents[agent].name(),
                    reading.commentary
                );
            }
            if !reading.legal {
                log::warn!(
                    "[hand {}] ILLEGAL MOVE by {} ({:?}) - auto-folding",
                    self.id,
                    agents[agent].name(),
                    raw.lines().next().unwrap_or_default()
                );
                agents[agent].mark_illegal();
            }
            if let Some(ref notes) = reading.notes {
                agents[agent].annotate(notes);
            }
            agents[agent].track(
                &observation.position,
                reading.legal && matches!(reading.action, MoveToken::RaiseTo(_)),
            );
            let action = match self.apply(reading.action) {
                Ok(action) => action,
                Err(e) => {
                    // slipped past validation but the engine knows better;
                    // one bad turn never aborts the round
                    log::warn!(
                        "[hand {}] engine rejected {} from {}, forced fold: {:#}",
                        self.id,
                        reading.action,
                        agents[agent].name(),
                        e
                    );
                    agents[agent].mark_illegal();
                    self.table.fold()?;
                    MoveToken::Fold
                }
            };
            turns.push(TurnRecord {
                seat,
                street,
                action,
                commentary: reading.commentary,
            });
            self.narrate();
        }
        Ok(self.settle(starting, turns, agents))
    }

    fn apply(&mut self, action: MoveToken) -> Result<MoveToken> {
        match action {
            MoveToken::Fold => self.table.fold()?,
            MoveToken::Check | MoveToken::Call => self.table.check_or_call()?,
            MoveToken::RaiseTo(amount) => self.table.raise_to(amount)?,
        }
        Ok(action)
    }

    fn settle(self, starting: Vec<crate::Chips>, turns: Vec<TurnRecord>, agents: &[Agent]) -> RoundRecord {
        let k = self.table.seats();
        let finals = self.table.stacks();
        let profits = finals
            .iter()
            .zip(starting.iter())
            .map(|(f, s)| *f as i64 - *s as i64)
            .collect::<Vec<i64>>();
        let standings = (0..k)
            .map(|seat| {
                let agent = rotation::seat_to_agent(seat, self.offset, k);
                format!("{}={}", agents[agent].name(), finals[seat])
            })
            .collect::<Vec<_>>()
            .join(", ");
        log::info!("[hand {}] result -> stacks: {}", self.id, standings);
        RoundRecord {
            id: self.id,
            offset: self.offset,
            stacks: starting,
            turns,
            events: self.table.events().to_vec(),
            holes: (0..k).map(|seat| self.table.hole(seat).to_vec()).collect(),
            board: self.table.board().to_vec(),
            profits,
        }
    }

    fn introduce(&self, agents: &[Agent]) {
        let k = self.table.seats();
        log::info!("=== Hand {} ===", self.id);
        for seat in 0..k {
            let agent = rotation::seat_to_agent(seat, self.offset, k);
            let hole = self
                .table
                .hole(seat)
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            log::info!(
                "[hand {}] P{} ({}) is {} holding {}",
                self.id,
                seat,
                view::position_label(seat, k),
                agents[agent].name(),
                hole
            );
        }
    }

    /// print engine events as they appear, each exactly once
    fn narrate(&mut self) {
        for event in self.table.events().iter().skip(self.narrated) {
            log::info!("[hand {}] {}", self.id, event);
        }
        self.narrated = self.table.events().len();
    }
}
