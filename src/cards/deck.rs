use super::card::Card;
use super::card::Rank;
use super::card::Suit;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A shuffled deck dealt from the top. Construction is the only place
/// randomness enters a round, so a seeded deck makes a whole hand
/// reproducible.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn shuffled(rng: &mut SmallRng) -> Self {
        let mut cards = Self::ordered();
        cards.shuffle(rng);
        Self(cards)
    }
    pub fn seeded(seed: u64) -> Self {
        Self::shuffled(&mut SmallRng::seed_from_u64(seed))
    }
    /// fixed dealing order for tests: cards come off the front of the
    /// given list, remaining cards follow in sorted order.
    pub fn rigged(top: Vec<Card>) -> Self {
        let mut rest = Self::ordered();
        rest.retain(|c| !top.contains(c));
        let mut cards = top;
        cards.extend(rest);
        cards.reverse(); // deal from the back
        Self(cards)
    }

    pub fn deal(&mut self) -> Card {
        self.0.pop().expect("52 cards outlast any single hand")
    }
    pub fn remaining(&self) -> usize {
        self.0.len()
    }

    fn ordered() -> Vec<Card> {
        Suit::all()
            .iter()
            .flat_map(|s| Rank::all().iter().map(|r| Card::from((*r, *s))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck() {
        let deck = Deck::seeded(0);
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn seeded_decks_agree() {
        let mut a = Deck::seeded(42);
        let mut b = Deck::seeded(42);
        for _ in 0..52 {
            assert_eq!(a.deal(), b.deal());
        }
    }

    #[test]
    fn rigged_deals_in_order() {
        let top = vec![Card::from("As"), Card::from("Kd"), Card::from("2c")];
        let mut deck = Deck::rigged(top.clone());
        assert_eq!(deck.remaining(), 52);
        for card in top {
            assert_eq!(deck.deal(), card);
        }
    }
}
