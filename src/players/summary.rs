use crate::play::view::position_label;
use crate::run::record::RoundRecord;
use crate::table::TableEvent;
use crate::Position;

/// Render a completed round into the human-readable form an agent carries
/// between rounds. Decisions, board reveals, and showdown reveals survive;
/// dealing and chip-moving bookkeeping does not. Board reveals pick up their
/// street names from a running count of cards already shown.
pub fn render(record: &RoundRecord, seat: Position) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Hand #{} (you were P{}, {}).",
        record.id,
        seat,
        position_label(seat, record.seats())
    ));
    if let Some(hole) = record.holes.get(seat).filter(|h| !h.is_empty()) {
        lines.push(format!("You held {}.", cards(hole)));
    }
    let mut revealed = 0;
    for event in record.events.iter() {
        match event {
            TableEvent::Fold { .. }
            | TableEvent::CheckCall { .. }
            | TableEvent::RaiseTo { .. }
            | TableEvent::Show { .. } => lines.push(event.to_string()),
            TableEvent::BoardDeal { cards: dealt } => {
                revealed += dealt.len();
                lines.push(format!(
                    "{} ({} card{}): {}",
                    crate::cards::Street::from_board(revealed),
                    dealt.len(),
                    if dealt.len() == 1 { "" } else { "s" },
                    cards(dealt)
                ));
            }
            TableEvent::HoleDeal { .. } | TableEvent::Blind { .. } | TableEvent::Push { .. } => {}
        }
    }
    if !record.board.is_empty() {
        lines.push(format!("Final board: {}.", cards(&record.board)));
    }
    lines.push(outcome(record.profit(seat)));
    lines.join("\n")
}

fn outcome(profit: i64) -> String {
    match profit {
        p if p > 0 => format!("You won {} chips.", p),
        p if p < 0 => format!("You lost {} chips.", -p),
        _ => "You broke even.".to_string(),
    }
}

fn cards(cards: &[crate::cards::Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::cards::Street;
    use crate::play::MoveToken;
    use crate::run::record::TurnRecord;

    fn fixture() -> RoundRecord {
        let flop = vec![Card::from("Qs"), Card::from("Jh"), Card::from("2d")];
        let turn = vec![Card::from("5c")];
        let mut board = flop.clone();
        board.extend(turn.iter());
        RoundRecord {
            id: 3,
            offset: 1,
            stacks: vec![10_000, 10_000],
            turns: vec![TurnRecord {
                seat: 0,
                street: Street::Preflop,
                action: MoveToken::Call,
                commentary: String::new(),
            }],
            events: vec![
                TableEvent::HoleDeal { seat: 0 },
                TableEvent::Blind { seat: 0, amount: 50 },
                TableEvent::Blind { seat: 1, amount: 100 },
                TableEvent::CheckCall { seat: 0, amount: 50 },
                TableEvent::CheckCall { seat: 1, amount: 0 },
                TableEvent::BoardDeal { cards: flop },
                TableEvent::BoardDeal { cards: turn },
                TableEvent::Fold { seat: 1 },
                TableEvent::Push { seat: 0, amount: 200 },
            ],
            holes: vec![
                vec![Card::from("As"), Card::from("Kd")],
                vec![Card::from("7c"), Card::from("7d")],
            ],
            board,
            profits: vec![100, -100],
        }
    }

    #[test]
    fn streets_relabeled_by_running_count() {
        let text = render(&fixture(), 0);
        assert!(text.contains("Flop (3 cards): Qs Jh 2d"));
        assert!(text.contains("Turn (1 card): 5c"));
    }

    #[test]
    fn noise_events_filtered() {
        let text = render(&fixture(), 0);
        assert!(!text.contains("posts blind"));
        assert!(!text.contains("dealt hole cards"));
        assert!(!text.contains("wins 200"));
        assert!(text.contains("P1 folds"));
    }

    #[test]
    fn outcome_phrasing() {
        assert_eq!(outcome(150), "You won 150 chips.");
        assert_eq!(outcome(-50), "You lost 50 chips.");
        assert_eq!(outcome(0), "You broke even.");
        assert!(render(&fixture(), 1).contains("You lost 100 chips."));
    }

    #[test]
    fn own_cards_and_header() {
        let text = render(&fixture(), 1);
        assert!(text.starts_with("Hand #3 (you were P1, Big Blind)."));
        assert!(text.contains("You held 7c 7d."));
        assert!(text.contains("Final board: Qs Jh 2d 5c."));
    }
}
