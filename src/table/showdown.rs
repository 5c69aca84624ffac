use crate::cards::Strength;
use crate::Chips;

/// One seat's stake in the settlement: what it risked over the whole hand,
/// whether it folded, and the strength it can show.
#[derive(Debug, Clone)]
pub struct Entry {
    pub risked: Chips,
    pub reward: Chips,
    pub folded: bool,
    pub strength: Strength,
}

impl Entry {
    pub fn new(risked: Chips, folded: bool, strength: Strength) -> Self {
        Self {
            risked,
            reward: 0,
            folded,
            strength,
        }
    }
}

/// Settles a pot, side pots included, by peeling off layers: find the
/// strongest live strength not yet paid, cap each layer at the least-risked
/// winner's commitment, distribute, then move down to the next strength
/// until every risked chip has been returned as reward.
pub struct Showdown {
    entries: Vec<Entry>,
    best: Option<Strength>,
    distributing: Chips,
    distributed: Chips,
}

impl From<Vec<Entry>> for Showdown {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            best: None,
            distributing: 0,
            distributed: 0,
        }
    }
}

impl Showdown {
    pub fn settle(mut self) -> Vec<Entry> {
        'strengths: while let Some(strength) = self.strongest() {
            self.best = Some(strength);
            'layers: while let Some(bound) = self.unpaid_layer() {
                self.distributing = bound;
                self.distribute();
                if self.is_complete() {
                    break 'strengths;
                } else {
                    continue 'layers;
                }
            }
        }
        self.entries
    }

    /// strongest live strength strictly below the last one paid out
    fn strongest(&self) -> Option<Strength> {
        self.entries
            .iter()
            .filter(|e| !e.folded)
            .filter(|e| match &self.best {
                Some(best) => e.strength < *best,
                None => true,
            })
            .map(|e| e.strength.clone())
            .max()
    }
    /// next layer bound: least commitment among current winners not yet
    /// fully credited
    fn unpaid_layer(&mut self) -> Option<Chips> {
        self.distributed = self.distributing;
        self.entries
            .iter()
            .filter(|e| !e.folded)
            .filter(|e| Some(&e.strength) == self.best.as_ref())
            .filter(|e| e.risked > self.distributed)
            .map(|e| e.risked)
            .min()
    }
    /// chips contributed by everyone into the current layer
    fn winnings(&self) -> Chips {
        self.entries
            .iter()
            .map(|e| e.risked.min(self.distributing))
            .map(|r| r.saturating_sub(self.distributed))
            .sum()
    }
    fn distribute(&mut self) {
        let chips = self.winnings();
        let best = self.best.clone();
        let mut winners = self
            .entries
            .iter_mut()
            .filter(|e| !e.folded)
            .filter(|e| Some(&e.strength) == best.as_ref())
            .filter(|e| e.risked > self.distributed)
            .collect::<Vec<_>>();
        let n = winners.len() as Chips;
        let share = chips / n;
        let bonus = chips % n;
        for winner in winners.iter_mut() {
            winner.reward += share;
        }
        for winner in winners.iter_mut().take(bonus as usize) {
            winner.reward += 1;
        }
    }
    fn is_complete(&self) -> bool {
        let risked = self.entries.iter().map(|e| e.risked).sum::<Chips>();
        let reward = self.entries.iter().map(|e| e.reward).sum::<Chips>();
        risked == reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn strength(s: &str) -> Strength {
        let cards = s.split_whitespace().map(Card::from).collect::<Vec<_>>();
        Strength::from(cards.as_slice())
    }
    fn ace_high() -> Strength {
        strength("As Kh Qd Jc 9s")
    }
    fn one_pair() -> Strength {
        strength("As Ah Kd Qc Js")
    }
    fn two_pair() -> Strength {
        strength("As Ah Kd Kc Qs")
    }
    fn triplets() -> Strength {
        strength("As Ah Ad Kc Qs")
    }
    fn the_nuts() -> Strength {
        strength("Ts Jh Qd Kc As")
    }

    fn rewards(entries: Vec<Entry>) -> Vec<Chips> {
        Showdown::from(entries).settle().iter().map(|e| e.reward).collect()
    }

    #[test]
    fn heads_up_showdown() {
        let paid = rewards(vec![
            Entry::new(100, false, ace_high()),
            Entry::new(100, false, one_pair()),
        ]);
        assert_eq!(paid, vec![0, 200]);
    }

    #[test]
    fn winners_folded() {
        let paid = rewards(vec![
            Entry::new(50, true, the_nuts()),
            Entry::new(100, false, two_pair()),
            Entry::new(75, true, the_nuts()),
            Entry::new(100, false, one_pair()),
        ]);
        assert_eq!(paid, vec![0, 325, 0, 0]);
    }

    #[test]
    fn multiway_pot_split() {
        let paid = rewards(vec![
            Entry::new(100, false, two_pair()),
            Entry::new(100, false, two_pair()),
            Entry::new(100, false, one_pair()),
        ]);
        assert_eq!(paid, vec![150, 150, 0]);
    }

    #[test]
    fn multiway_all_in_with_uneven_stacks() {
        let paid = rewards(vec![
            Entry::new(150, false, the_nuts()),
            Entry::new(200, false, triplets()),
            Entry::new(350, false, one_pair()),
            Entry::new(50, false, ace_high()),
        ]);
        assert_eq!(paid, vec![500, 100, 150, 0]);
    }

    #[test]
    fn singular_all_in_with_side_pot() {
        let paid = rewards(vec![
            Entry::new(50, false, two_pair()),
            Entry::new(100, false, one_pair()),
            Entry::new(100, false, ace_high()),
        ]);
        assert_eq!(paid, vec![150, 100, 0]);
    }

    #[test]
    fn singular_all_in_with_side_pot_split() {
        let paid = rewards(vec![
            Entry::new(50, false, the_nuts()),
            Entry::new(100, false, two_pair()),
            Entry::new(100, false, two_pair()),
        ]);
        assert_eq!(paid, vec![150, 50, 50]);
    }

    #[test]
    fn last_man_standing() {
        let paid = rewards(vec![
            Entry::new(50, true, the_nuts()),
            Entry::new(100, false, ace_high()),
            Entry::new(75, true, the_nuts()),
            Entry::new(25, true, the_nuts()),
        ]);
        assert_eq!(paid, vec![0, 250, 0, 0]);
    }
}
