use crate::cards::Card;
use crate::cards::Street;
use crate::play::MoveToken;
use crate::table::TableEvent;
use crate::Chips;
use crate::Position;

/// One interpreted decision as it went to the engine: post-fallback, so this
/// is always the canonical move that actually applied.
#[derive(Debug, Clone)]
pub struct TurnRecord {
    pub seat: Position,
    pub street: Street,
    pub action: MoveToken,
    pub commentary: String,
}

/// Everything a completed round left behind. Immutable once stored: memory
/// summaries, win recounts, and VPIP/PFR scans all re-read this rather than
/// any live state.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub id: u64,
    /// rotation offset in force when this round was played; stat recounts
    /// must map seats through this, never the current offset
    pub offset: usize,
    /// starting stacks in seat order
    pub stacks: Vec<Chips>,
    pub turns: Vec<TurnRecord>,
    pub events: Vec<TableEvent>,
    /// per-seat private cards
    pub holes: Vec<Vec<Card>>,
    pub board: Vec<Card>,
    /// per-seat profit; sums to zero when the accounting is right
    pub profits: Vec<i64>,
}

impl RoundRecord {
    pub fn seats(&self) -> usize {
        self.stacks.len()
    }
    pub fn profit(&self, seat: Position) -> i64 {
        self.profits[seat]
    }
    /// did this seat voluntarily put chips in preflop?
    pub fn vpip(&self, seat: Position) -> bool {
        self.turns
            .iter()
            .filter(|t| t.seat == seat)
            .filter(|t| t.street == Street::Preflop)
            .any(|t| matches!(t.action, MoveToken::Call | MoveToken::RaiseTo(_)))
    }
    /// did this seat raise preflop?
    pub fn pfr(&self, seat: Position) -> bool {
        self.turns
            .iter()
            .filter(|t| t.seat == seat)
            .filter(|t| t.street == Street::Preflop)
            .any(|t| matches!(t.action, MoveToken::RaiseTo(_)))
    }
}
