use super::card::Card;
use super::card::Rank;
use super::card::Suit;

/// Hand category ladder. Ordering is the showdown ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOAK,
    Straight,
    Flush,
    FullHouse,
    FourOAK,
    StraightFlush,
}

/// Best five-card strength of up to seven cards. `decides` holds the
/// category ranks followed by kickers, highest first, so the derived
/// lexicographic Ord breaks ties exactly as the rules do.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    decides: Vec<Rank>,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    fn new(ranking: Ranking, decides: Vec<Rank>) -> Self {
        Self { ranking, decides }
    }
}

impl From<&[Card]> for Strength {
    fn from(cards: &[Card]) -> Self {
        Evaluation::from(cards).strength()
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self.ranking {
            Ranking::HighCard => "HighCard",
            Ranking::OnePair => "OnePair",
            Ranking::TwoPair => "TwoPair",
            Ranking::ThreeOAK => "ThreeOfAKind",
            Ranking::Straight => "Straight",
            Ranking::Flush => "Flush",
            Ranking::FullHouse => "FullHouse",
            Ranking::FourOAK => "FourOfAKind",
            Ranking::StraightFlush => "StraightFlush",
        };
        write!(f, "{:<13}", name)?;
        for rank in self.decides.iter() {
            write!(f, " {}", rank)?;
        }
        Ok(())
    }
}

/// Rank/suit tallies for one set of cards, searched from the top of the
/// ladder down.
struct Evaluation {
    counts: [u8; 13],
    suited: [Vec<Rank>; 4],
}

impl From<&[Card]> for Evaluation {
    fn from(cards: &[Card]) -> Self {
        let mut counts = [0u8; 13];
        let mut suited: [Vec<Rank>; 4] = Default::default();
        for card in cards {
            counts[card.rank().index()] += 1;
            suited[card.suit().index()].push(card.rank());
        }
        for ranks in suited.iter_mut() {
            ranks.sort_unstable_by(|a, b| b.cmp(a));
        }
        Self { counts, suited }
    }
}

impl Evaluation {
    fn strength(&self) -> Strength {
        None.or_else(|| self.straight_flush())
            .or_else(|| self.four_oak())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.three_oak())
            .or_else(|| self.two_pair())
            .or_else(|| self.one_pair())
            .unwrap_or_else(|| self.high_card())
    }

    fn straight_flush(&self) -> Option<Strength> {
        Suit::all()
            .iter()
            .map(|s| &self.suited[s.index()])
            .filter(|ranks| ranks.len() >= 5)
            .find_map(|ranks| Self::straight_high(ranks))
            .map(|high| Strength::new(Ranking::StraightFlush, vec![high]))
    }
    fn four_oak(&self) -> Option<Strength> {
        self.best_with_count(4, None).map(|quad| {
            let kick = self.kickers(&[quad], 1);
            Strength::new(Ranking::FourOAK, Self::join(vec![quad], kick))
        })
    }
    fn full_house(&self) -> Option<Strength> {
        self.best_with_count(3, None).and_then(|trip| {
            self.best_with_count(2, Some(trip))
                .map(|pair| Strength::new(Ranking::FullHouse, vec![trip, pair]))
        })
    }
    fn flush(&self) -> Option<Strength> {
        Suit::all()
            .iter()
            .map(|s| &self.suited[s.index()])
            .find(|ranks| ranks.len() >= 5)
            .map(|ranks| Strength::new(Ranking::Flush, ranks[..5].to_vec()))
    }
    fn straight(&self) -> Option<Strength> {
        let distinct = self.distinct();
        Self::straight_high(&distinct).map(|high| Strength::new(Ranking::Straight, vec![high]))
    }
    fn three_oak(&self) -> Option<Strength> {
        self.best_with_count(3, None).map(|trip| {
            let kick = self.kickers(&[trip], 2);
            Strength::new(Ranking::ThreeOAK, Self::join(vec![trip], kick))
        })
    }
    fn two_pair(&self) -> Option<Strength> {
        let hi = self.best_with_count(2, None)?;
        let lo = self.best_with_count(2, Some(hi))?;
        let kick = self.kickers(&[hi, lo], 1);
        Some(Strength::new(Ranking::TwoPair, Self::join(vec![hi, lo], kick)))
    }
    fn one_pair(&self) -> Option<Strength> {
        self.best_with_count(2, None).map(|pair| {
            let kick = self.kickers(&[pair], 3);
            Strength::new(Ranking::OnePair, Self::join(vec![pair], kick))
        })
    }
    fn high_card(&self) -> Strength {
        Strength::new(Ranking::HighCard, self.kickers(&[], 5))
    }

    /// highest rank held at least n times, skipping one rank if given
    fn best_with_count(&self, n: u8, skip: Option<Rank>) -> Option<Rank> {
        Rank::all()
            .iter()
            .rev()
            .filter(|r| Some(**r) != skip)
            .find(|r| self.counts[r.index()] >= n)
            .copied()
    }
    /// highest remaining ranks outside the category, one entry per rank
    fn kickers(&self, used: &[Rank], n: usize) -> Vec<Rank> {
        Rank::all()
            .iter()
            .rev()
            .filter(|r| self.counts[r.index()] > 0)
            .filter(|r| !used.contains(r))
            .take(n)
            .copied()
            .collect()
    }
    fn distinct(&self) -> Vec<Rank> {
        Rank::all()
            .iter()
            .rev()
            .filter(|r| self.counts[r.index()] > 0)
            .copied()
            .collect()
    }
    /// highest straight top among a descending set of distinct ranks,
    /// wheel included
    fn straight_high(ranks: &[Rank]) -> Option<Rank> {
        let held = |r: &Rank| ranks.contains(r);
        for high in (4..13).rev() {
            if (high - 4..=high).all(|i| held(&Rank::from(i))) {
                return Some(Rank::from(high));
            }
        }
        let wheel = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five];
        if wheel.iter().all(held) {
            return Some(Rank::Five);
        }
        None
    }
    fn join(mut head: Vec<Rank>, tail: Vec<Rank>) -> Vec<Rank> {
        head.extend(tail);
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        let cards = s.split_whitespace().map(Card::from).collect::<Vec<_>>();
        Strength::from(cards.as_slice())
    }

    #[test]
    fn high_card() {
        assert_eq!(strength("As Kh Qd Jc 9s").ranking(), Ranking::HighCard);
    }
    #[test]
    fn one_pair() {
        assert_eq!(strength("As Ah Kd Qc Js").ranking(), Ranking::OnePair);
    }
    #[test]
    fn two_pair() {
        assert_eq!(strength("As Ah Kd Kc Qs").ranking(), Ranking::TwoPair);
    }
    #[test]
    fn three_oak() {
        assert_eq!(strength("As Ah Ad Kc Qs").ranking(), Ranking::ThreeOAK);
    }
    #[test]
    fn straight() {
        assert_eq!(strength("Ts Jh Qd Kc As").ranking(), Ranking::Straight);
    }
    #[test]
    fn wheel_straight() {
        let s = strength("As 2h 3d 4c 5s");
        assert_eq!(s.ranking(), Ranking::Straight);
        assert!(s < strength("2s 3h 4d 5c 6s"));
    }
    #[test]
    fn flush() {
        assert_eq!(strength("As Ks Qs Js 9s").ranking(), Ranking::Flush);
    }
    #[test]
    fn full_house() {
        assert_eq!(strength("2s 2h 2d 3c 3s").ranking(), Ranking::FullHouse);
    }
    #[test]
    fn four_oak() {
        assert_eq!(strength("As Ah Ad Ac Ks").ranking(), Ranking::FourOAK);
    }
    #[test]
    fn straight_flush() {
        assert_eq!(strength("Ts Js Qs Ks As").ranking(), Ranking::StraightFlush);
    }

    #[test]
    fn seven_card_hand() {
        assert_eq!(strength("As Ah Kd Kc Qs Jh 9d").ranking(), Ranking::TwoPair);
    }
    #[test]
    fn flush_over_straight() {
        assert_eq!(strength("4h 6h 7h 8h 9h Ts").ranking(), Ranking::Flush);
    }
    #[test]
    fn full_house_over_flush() {
        assert_eq!(
            strength("Kh Ah Ad As Ks Qs Js 9s").ranking(),
            Ranking::FullHouse
        );
    }
    #[test]
    fn two_three_oak_is_full_house() {
        assert_eq!(
            strength("As Ah Ad Kc Ks Kh Qd").ranking(),
            Ranking::FullHouse
        );
    }

    #[test]
    fn kickers_break_ties() {
        assert!(strength("As Ah Kd Qc Js") > strength("As Ah Kd Qc Ts"));
        assert!(strength("As Kh Qd Jc 9s") > strength("As Kh Qd Jc 8s"));
        assert_eq!(strength("As Ah Kd Qc Js"), strength("Ad Ac Kh Qs Jd"));
    }

    #[test]
    fn pair_beats_high_card_regardless_of_ranks() {
        assert!(strength("2s 2h 3d 4c 5s") > strength("As Kh Qd Jc 9s"));
    }
}
