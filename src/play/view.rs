use super::token::MoveToken;
use crate::table::Table;
use crate::Chips;
use crate::Position;
use serde::Serialize;

/// Fixed position names. Past six seats the list wraps and names repeat;
/// the source accepted that and so do we.
const LABELS: [&str; 6] = ["Button", "Small Blind", "Big Blind", "UTG", "Hijack", "Cutoff"];

pub fn position_label(seat: Position, seats: usize) -> &'static str {
    match seats {
        2 => match seat {
            0 => "Button",
            _ => "Big Blind",
        },
        _ => LABELS[seat % LABELS.len()],
    }
}

/// Minimum-raise report. Raising being closed is a state of its own, not a
/// magic amount: 0 and even negative-looking values are conceivable raises
/// in degenerate configurations, so the sentinel is a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinRaise {
    To(Chips),
    Unavailable,
}

impl Serialize for MinRaise {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            MinRaise::To(amount) => serializer.serialize_u32(*amount),
            MinRaise::Unavailable => serializer.serialize_str("Cannot Raise"),
        }
    }
}

/// Everything a decision provider is told about the round, rebuilt fresh
/// each turn and discarded after. Field names serialize to the prompt keys
/// the providers were tuned on.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    #[serde(rename = "Current Street")]
    pub street: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "board")]
    pub board: Vec<String>,
    #[serde(rename = "Hole Cards")]
    pub hole: Vec<String>,
    #[serde(rename = "Your stack")]
    pub stack: Chips,
    #[serde(rename = "Opponent stacks")]
    pub opponents: Vec<Chips>,
    #[serde(rename = "Pot size")]
    pub pot: Chips,
    #[serde(rename = "to_call")]
    pub to_call: Chips,
    #[serde(rename = "min_raise_to")]
    pub min_raise: MinRaise,
    #[serde(rename = "history")]
    pub history: Vec<String>,
}

/// Project the engine state for the seat about to act.
pub fn project(table: &dyn Table, seat: Position) -> Observation {
    Observation {
        street: table.street().to_string(),
        position: position_label(seat, table.seats()).to_string(),
        board: table.board().iter().map(|c| c.to_string()).collect(),
        hole: table.hole(seat).iter().map(|c| c.to_string()).collect(),
        stack: table.stack(seat),
        opponents: (0..table.seats())
            .filter(|s| *s != seat)
            .map(|s| table.stack(s))
            .collect(),
        pot: table.pot(),
        to_call: table.to_call(),
        min_raise: match table.can_raise() {
            true => MinRaise::To(table.min_raise_to()),
            false => MinRaise::Unavailable,
        },
        history: table
            .events()
            .iter()
            .filter(|e| e.observable())
            .map(|e| e.to_string())
            .collect(),
    }
}

/// The enumerated vocabulary for the current turn plus the one authoritative
/// answer to "is this token acceptable". Always non-empty: checking or
/// calling is available whenever a decision is owed.
#[derive(Debug, Clone)]
pub struct LegalMoves {
    folding: bool,
    calling: Chips,
    raising: Option<(Chips, Chips)>,
    window: (Chips, Chips),
}

impl LegalMoves {
    pub fn derive(table: &dyn Table) -> Self {
        let window = (table.min_raise_to(), table.max_raise_to());
        Self {
            folding: table.can_fold(),
            calling: table.to_call(),
            raising: table.can_raise().then_some(window),
            window,
        }
    }

    /// tokens in offer order: fold, then check or call, then the raise
    /// window. The raise entry documents the would-be range even when
    /// raising is closed; `admits` stays authoritative.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(3);
        if self.folding {
            tokens.push(MoveToken::Fold.to_string());
        }
        match self.calling {
            0 => tokens.push(MoveToken::Check.to_string()),
            _ => tokens.push(MoveToken::Call.to_string()),
        }
        tokens.push(format!("raise_to: {} to {}", self.window.0, self.window.1));
        tokens
    }

    pub fn admits(&self, token: &MoveToken) -> bool {
        match token {
            MoveToken::Fold => self.folding,
            MoveToken::Check => self.calling == 0,
            MoveToken::Call => self.calling > 0,
            MoveToken::RaiseTo(amount) => match self.raising {
                Some((least, most)) => *amount >= least && *amount <= most,
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(folding: bool, calling: Chips, raising: Option<(Chips, Chips)>) -> LegalMoves {
        LegalMoves {
            folding,
            calling,
            raising,
            window: raising.unwrap_or((200, 10_000)),
        }
    }

    #[test]
    fn check_when_nothing_owed_call_otherwise() {
        assert_eq!(moves(false, 0, None).tokens()[0], "check");
        assert_eq!(moves(true, 50, None).tokens()[..2], ["fold", "call"]);
    }

    #[test]
    fn raise_window_always_documented() {
        let closed = moves(true, 50, None);
        assert!(closed.tokens().iter().any(|t| t.starts_with("raise_to:")));
        assert!(!closed.admits(&MoveToken::RaiseTo(500)));
    }

    #[test]
    fn admits_respects_the_window() {
        let open = moves(true, 50, Some((200, 1_000)));
        assert!(open.admits(&MoveToken::RaiseTo(200)));
        assert!(open.admits(&MoveToken::RaiseTo(1_000)));
        assert!(!open.admits(&MoveToken::RaiseTo(199)));
        assert!(!open.admits(&MoveToken::RaiseTo(1_001)));
    }

    #[test]
    fn check_and_call_are_mutually_exclusive() {
        let unowed = moves(false, 0, None);
        assert!(unowed.admits(&MoveToken::Check));
        assert!(!unowed.admits(&MoveToken::Call));
        let owed = moves(true, 100, None);
        assert!(owed.admits(&MoveToken::Call));
        assert!(!owed.admits(&MoveToken::Check));
    }

    #[test]
    fn position_labels_wrap_past_six_seats() {
        assert_eq!(position_label(0, 2), "Button");
        assert_eq!(position_label(1, 2), "Big Blind");
        assert_eq!(position_label(1, 6), "Small Blind");
        assert_eq!(position_label(6, 9), "Button"); // wraparound, accepted
    }

    #[test]
    fn min_raise_serializes_as_amount_or_sentinel() {
        let open = serde_json::to_value(MinRaise::To(200)).unwrap();
        let shut = serde_json::to_value(MinRaise::Unavailable).unwrap();
        assert_eq!(open, serde_json::json!(200));
        assert_eq!(shut, serde_json::json!("Cannot Raise"));
    }
}
