use crate::cards::Card;
use crate::Chips;
use crate::Position;

/// Structured round events, tagged once at the source and matched
/// exhaustively everywhere else. Consumers filter by kind: observations keep
/// seat+amount events and board deals, memory summaries keep player decisions
/// and reveals, narration prints everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// a seat received its private cards
    HoleDeal { seat: Position },
    /// forced bet posted before any decision
    Blind { seat: Position, amount: Chips },
    Fold { seat: Position },
    /// amount 0 is a check
    CheckCall { seat: Position, amount: Chips },
    /// amount is the raise-to target, not the increment
    RaiseTo { seat: Position, amount: Chips },
    /// community cards revealed to open a street
    BoardDeal { cards: Vec<Card> },
    /// showdown reveal
    Show { seat: Position, hole: Vec<Card> },
    /// pot (or pot share) awarded
    Push { seat: Position, amount: Chips },
}

impl TableEvent {
    /// does this entry belong in a seat's observation history?
    /// seat+amount events and board deals only.
    pub fn observable(&self) -> bool {
        matches!(
            self,
            TableEvent::Blind { .. }
                | TableEvent::CheckCall { .. }
                | TableEvent::RaiseTo { .. }
                | TableEvent::BoardDeal { .. }
        )
    }
}

impl std::fmt::Display for TableEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TableEvent::HoleDeal { seat } => write!(f, "P{} dealt hole cards", seat),
            TableEvent::Blind { seat, amount } => write!(f, "P{} posts blind {}", seat, amount),
            TableEvent::Fold { seat } => write!(f, "P{} folds", seat),
            TableEvent::CheckCall { seat, amount: 0 } => write!(f, "P{} checks", seat),
            TableEvent::CheckCall { seat, amount } => write!(f, "P{} calls {}", seat, amount),
            TableEvent::RaiseTo { seat, amount } => write!(f, "P{} raises to {}", seat, amount),
            TableEvent::BoardDeal { cards } => {
                write!(f, "Board dealt:")?;
                for card in cards {
                    write!(f, " {}", card)?;
                }
                Ok(())
            }
            TableEvent::Show { seat, hole } => {
                write!(f, "P{} shows", seat)?;
                for card in hole {
                    write!(f, " {}", card)?;
                }
                Ok(())
            }
            TableEvent::Push { seat, amount } => write!(f, "P{} wins {}", seat, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_and_call_render_apart() {
        let check = TableEvent::CheckCall { seat: 0, amount: 0 };
        let call = TableEvent::CheckCall { seat: 0, amount: 50 };
        assert_eq!(check.to_string(), "P0 checks");
        assert_eq!(call.to_string(), "P0 calls 50");
    }

    #[test]
    fn observation_filter() {
        assert!(TableEvent::Blind { seat: 0, amount: 1 }.observable());
        assert!(TableEvent::BoardDeal { cards: vec![] }.observable());
        assert!(!TableEvent::Fold { seat: 0 }.observable());
        assert!(!TableEvent::HoleDeal { seat: 0 }.observable());
        assert!(!TableEvent::Push { seat: 0, amount: 9 }.observable());
    }
}
