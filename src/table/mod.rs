pub mod event;
pub mod holdem;
pub mod seat;
pub mod showdown;

pub use event::TableEvent;
pub use holdem::Holdem;
pub use seat::Seat;
pub use seat::State;

use crate::cards::Card;
use crate::cards::Street;
use crate::Chips;
use crate::Position;

/// The rules-engine contract. The orchestration core consumes exactly this
/// surface and never re-implements betting legality; mutators enforce the
/// rules internally and reject anything else.
///
/// Predicates and amounts describe the current actor and are meaningful only
/// while `actor()` is `Some`.
pub trait Table {
    /// number of seats this round
    fn seats(&self) -> usize;
    /// seat whose decision is pending, or None once the round is settled
    fn actor(&self) -> Option<Position>;
    fn street(&self) -> Street;
    fn pot(&self) -> Chips;
    fn board(&self) -> &[Card];
    /// chips behind, excluding anything already committed
    fn stack(&self, seat: Position) -> Chips;
    fn stacks(&self) -> Vec<Chips>;
    fn hole(&self, seat: Position) -> &[Card];

    fn can_fold(&self) -> bool;
    fn can_check_or_call(&self) -> bool;
    /// chips the actor would put in to continue (capped by their stack)
    fn to_call(&self) -> Chips;
    fn can_raise(&self) -> bool;
    /// smallest accepted raise-to target
    fn min_raise_to(&self) -> Chips;
    /// largest accepted raise-to target (the all-in commitment)
    fn max_raise_to(&self) -> Chips;

    /// append-only structured log of everything that happened this round
    fn events(&self) -> &[TableEvent];

    fn fold(&mut self) -> anyhow::Result<()>;
    fn check_or_call(&mut self) -> anyhow::Result<()>;
    fn raise_to(&mut self, amount: Chips) -> anyhow::Result<()>;
}
