use super::event::TableEvent;
use super::seat::Seat;
use super::seat::State;
use super::showdown::Entry;
use super::showdown::Showdown;
use super::Table;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Street;
use crate::cards::Strength;
use crate::Chips;
use crate::Position;
use anyhow::bail;
use anyhow::Result;
use std::collections::VecDeque;

/// Default no-limit hold'em implementation of the [Table] contract.
///
/// Seats arrive already rotated: seat 0 is the button. Heads-up the button
/// posts the small blind; three-handed and up the blinds sit at seats 1 and 2.
/// Chance events (hole cards, board cards) resolve automatically between
/// decisions, so callers only ever see a seat owing a decision or a settled
/// round.
#[derive(Debug)]
pub struct Holdem {
    sblind: Chips,
    bblind: Chips,
    seats: Vec<Seat>,
    board: Vec<Card>,
    deck: Deck,
    pot: Chips,
    queue: VecDeque<Position>,
    events: Vec<TableEvent>,
    settled: bool,
}

impl Holdem {
    pub fn deal(stacks: &[Chips], blinds: (Chips, Chips), deck: Deck) -> Result<Self> {
        if stacks.len() < 2 {
            bail!("a round takes at least two seats, got {}", stacks.len());
        }
        if let Some(seat) = stacks.iter().position(|s| *s == 0) {
            bail!("seat {} has no chips left", seat);
        }
        let mut this = Self {
            sblind: blinds.0,
            bblind: blinds.1,
            seats: stacks.iter().map(|s| Seat::new(*s)).collect(),
            board: Vec::with_capacity(5),
            deck,
            pot: 0,
            queue: VecDeque::new(),
            events: Vec::new(),
            settled: false,
        };
        this.deal_holes();
        this.post_blinds();
        this.open_preflop();
        this.advance();
        Ok(this)
    }

    fn deal_holes(&mut self) {
        for _ in 0..2 {
            for seat in self.seats.iter_mut() {
                let card = self.deck.deal();
                seat.deal(card);
            }
        }
        for seat in 0..self.seats.len() {
            self.events.push(TableEvent::HoleDeal { seat });
        }
    }
    fn post_blinds(&mut self) {
        let (sb, bb) = self.blind_seats();
        self.post(sb, self.sblind);
        self.post(bb, self.bblind);
    }
    fn post(&mut self, seat: Position, blind: Chips) {
        let posted = blind.min(self.seats[seat].stack());
        self.seats[seat].bet(posted);
        self.pot += posted;
        if self.seats[seat].stack() == 0 {
            self.seats[seat].set_state(State::Shoving);
        }
        self.events.push(TableEvent::Blind {
            seat,
            amount: posted,
        });
    }
    fn blind_seats(&self) -> (Position, Position) {
        match self.seats.len() {
            2 => (0, 1),
            _ => (1, 2),
        }
    }
    fn open_preflop(&mut self) {
        let (_, bb) = self.blind_seats();
        let first = (bb + 1) % self.seats.len();
        self.enqueue_from(first);
    }
    /// queue every seat still able to bet, in rotation order from `first`
    fn enqueue_from(&mut self, first: Position) {
        self.queue.clear();
        for i in 0..self.seats.len() {
            let seat = (first + i) % self.seats.len();
            if self.seats[seat].state() == State::Betting {
                self.queue.push_back(seat);
            }
        }
    }

    /// after every mutation: detect walkovers, close finished streets, run
    /// out the board when betting is impossible, settle at the river.
    fn advance(&mut self) {
        if self.settled {
            return;
        }
        if self.survivors() == 1 {
            self.concede();
            return;
        }
        while self.queue.is_empty() {
            for seat in self.seats.iter_mut() {
                seat.clear_stake();
            }
            if self.street() == Street::River {
                self.showdown();
                return;
            }
            self.deal_board();
            if self.bettors() >= 2 {
                self.enqueue_from(1 % self.seats.len());
            }
        }
    }
    fn deal_board(&mut self) {
        let street = self.street().next();
        let cards = (0..street.n_revealed())
            .map(|_| self.deck.deal())
            .collect::<Vec<Card>>();
        self.board.extend(cards.iter());
        self.events.push(TableEvent::BoardDeal { cards });
    }

    fn concede(&mut self) {
        let winner = self
            .seats
            .iter()
            .position(|s| s.state() != State::Folding)
            .expect("exactly one seat left standing");
        self.seats[winner].win(self.pot);
        self.events.push(TableEvent::Push {
            seat: winner,
            amount: self.pot,
        });
        self.finish();
    }
    fn showdown(&mut self) {
        for seat in 0..self.seats.len() {
            if self.seats[seat].state() != State::Folding {
                self.events.push(TableEvent::Show {
                    seat,
                    hole: self.seats[seat].hole().to_vec(),
                });
            }
        }
        let entries = self
            .seats
            .iter()
            .map(|s| Entry::new(s.spent(), s.state() == State::Folding, self.strength(s)))
            .collect::<Vec<Entry>>();
        for (seat, entry) in Showdown::from(entries).settle().iter().enumerate() {
            if entry.reward > 0 {
                self.seats[seat].win(entry.reward);
                self.events.push(TableEvent::Push {
                    seat,
                    amount: entry.reward,
                });
            }
        }
        self.finish();
    }
    fn finish(&mut self) {
        self.queue.clear();
        self.settled = true;
    }
    fn strength(&self, seat: &Seat) -> Strength {
        let mut cards = seat.hole().to_vec();
        cards.extend(self.board.iter());
        Strength::from(cards.as_slice())
    }

    /// seats that have not folded
    fn survivors(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .count()
    }
    /// seats that can still put chips in
    fn bettors(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() == State::Betting)
            .count()
    }
    /// highest street commitment among live seats
    fn effective_stake(&self) -> Chips {
        self.seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .map(|s| s.stake())
            .max()
            .unwrap_or(0)
    }
    fn actor_seat(&self) -> &Seat {
        let actor = self.actor().expect("no actor in a settled round");
        &self.seats[actor]
    }
    /// chips owed before the call cap is applied
    fn owed(&self) -> Chips {
        self.effective_stake() - self.actor_seat().stake()
    }
    /// min raise target: top stake plus the larger of the last raise
    /// increment and the big blind
    fn raise_floor(&self) -> Chips {
        let (most, next) = self
            .seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .map(|s| s.stake())
            .fold((0, 0), |(most, next), stake| {
                if stake > most {
                    (stake, most)
                } else if stake > next {
                    (most, stake)
                } else {
                    (most, next)
                }
            });
        most + (most - next).max(self.bblind)
    }
    fn pop_actor(&mut self) -> Position {
        self.queue.pop_front().expect("mutator guarded by actor()")
    }
}

impl Table for Holdem {
    fn seats(&self) -> usize {
        self.seats.len()
    }
    fn actor(&self) -> Option<Position> {
        if self.settled {
            None
        } else {
            self.queue.front().copied()
        }
    }
    fn street(&self) -> Street {
        Street::from_board(self.board.len())
    }
    fn pot(&self) -> Chips {
        self.pot
    }
    fn board(&self) -> &[Card] {
        &self.board
    }
    fn stack(&self, seat: Position) -> Chips {
        self.seats[seat].stack()
    }
    fn stacks(&self) -> Vec<Chips> {
        self.seats.iter().map(|s| s.stack()).collect()
    }
    fn hole(&self, seat: Position) -> &[Card] {
        self.seats[seat].hole()
    }

    fn can_fold(&self) -> bool {
        self.owed() > 0
    }
    fn can_check_or_call(&self) -> bool {
        self.actor().is_some()
    }
    fn to_call(&self) -> Chips {
        self.owed().min(self.actor_seat().stack())
    }
    fn can_raise(&self) -> bool {
        let others = self
            .seats
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.actor())
            .filter(|(_, s)| s.state() == State::Betting)
            .count();
        others > 0 && self.max_raise_to() > self.effective_stake()
    }
    fn min_raise_to(&self) -> Chips {
        self.raise_floor().min(self.max_raise_to())
    }
    fn max_raise_to(&self) -> Chips {
        let seat = self.actor_seat();
        seat.stake() + seat.stack()
    }

    fn events(&self) -> &[TableEvent] {
        &self.events
    }

    fn fold(&mut self) -> Result<()> {
        if self.actor().is_none() {
            bail!("no decision pending");
        }
        let seat = self.pop_actor();
        self.seats[seat].set_state(State::Folding);
        self.events.push(TableEvent::Fold { seat });
        self.advance();
        Ok(())
    }
    fn check_or_call(&mut self) -> Result<()> {
        if self.actor().is_none() {
            bail!("no decision pending");
        }
        let paid = self.to_call();
        let seat = self.pop_actor();
        self.seats[seat].bet(paid);
        self.pot += paid;
        if self.seats[seat].stack() == 0 {
            self.seats[seat].set_state(State::Shoving);
        }
        self.events.push(TableEvent::CheckCall { seat, amount: paid });
        self.advance();
        Ok(())
    }
    fn raise_to(&mut self, amount: Chips) -> Result<()> {
        if self.actor().is_none() {
            bail!("no decision pending");
        }
        if !self.can_raise() {
            bail!("raising is not permitted here");
        }
        let max = self.max_raise_to();
        let min = self.min_raise_to();
        if amount > max {
            bail!("raise to {} exceeds the {} all-in cap", amount, max);
        }
        // min_raise_to is clamped to the all-in cap, so a full-commitment
        // shove under the nominal floor passes here
        if amount < min {
            bail!("raise to {} is under the {} minimum", amount, min);
        }
        if amount <= self.effective_stake() {
            bail!("raise to {} does not raise the {} stake", amount, self.effective_stake());
        }
        let seat = self.pop_actor();
        let added = amount - self.seats[seat].stake();
        self.seats[seat].bet(added);
        self.pot += added;
        if self.seats[seat].stack() == 0 {
            self.seats[seat].set_state(State::Shoving);
        }
        self.events.push(TableEvent::RaiseTo { seat, amount });
        self.enqueue_from((seat + 1) % self.seats.len());
        self.queue.retain(|s| *s != seat);
        self.advance();
        Ok(())
    }
}
