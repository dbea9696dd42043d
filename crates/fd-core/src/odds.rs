//! Pairwise win/loss/draw odds between dice.
//!
//! Every face of one die is compared with every face of the other, so a
//! pair of six-sided dice yields 36 comparisons.

use crate::dice::Dice;

/// Outcome percentages for one ordered pair of dice, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Odds {
    /// Percentage of face pairs where the first die is higher.
    pub first_wins: f64,
    /// Percentage of face pairs where the second die is higher.
    pub second_wins: f64,
    /// Percentage of face pairs that tie.
    pub draws: f64,
}

/// Odds between two dice identified by their position in the dice set.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOdds {
    /// Index of the first die.
    pub first: usize,
    /// Index of the second die.
    pub second: usize,
    /// The computed odds.
    pub odds: Odds,
}

/// Compare every face of `a` against every face of `b`.
pub fn compare(a: &Dice, b: &Dice) -> Odds {
    let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);
    for x in a.faces() {
        for y in b.faces() {
            match x.cmp(y) {
                std::cmp::Ordering::Greater => wins += 1,
                std::cmp::Ordering::Less => losses += 1,
                std::cmp::Ordering::Equal => draws += 1,
            }
        }
    }
    let total = f64::from(wins + losses + draws);
    Odds {
        first_wins: percent(wins, total),
        second_wins: percent(losses, total),
        draws: percent(draws, total),
    }
}

/// Odds for every ordered pair of distinct dice in the set.
pub fn pairwise(dice: &[Dice]) -> Vec<PairOdds> {
    let mut rows = Vec::with_capacity(dice.len() * dice.len().saturating_sub(1));
    for (i, a) in dice.iter().enumerate() {
        for (j, b) in dice.iter().enumerate() {
            if i != j {
                rows.push(PairOdds {
                    first: i,
                    second: j,
                    odds: compare(a, b),
                });
            }
        }
    }
    rows
}

fn percent(count: u32, total: f64) -> f64 {
    (f64::from(count) / total * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(s: &str) -> Dice {
        s.parse().unwrap()
    }

    #[test]
    fn non_transitive_pair_sums_to_hundred() {
        let odds = compare(&dice("2,2,4,4,9,9"), &dice("6,8,1,1,8,6"));
        let sum = odds.first_wins + odds.second_wins + odds.draws;
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
        assert_eq!(odds.first_wins, 55.56);
        assert_eq!(odds.second_wins, 44.44);
        assert_eq!(odds.draws, 0.0);
    }

    #[test]
    fn identical_dice_draw_sometimes() {
        let d = dice("1,2,3,4,5,6");
        let odds = compare(&d, &d);
        assert_eq!(odds.first_wins, 41.67);
        assert_eq!(odds.second_wins, 41.67);
        assert_eq!(odds.draws, 16.67);
    }

    #[test]
    fn dominant_die_always_wins() {
        let odds = compare(&dice("7,7,7,7,7,7"), &dice("1,2,3,4,5,6"));
        assert_eq!(odds.first_wins, 100.0);
        assert_eq!(odds.second_wins, 0.0);
        assert_eq!(odds.draws, 0.0);
    }

    #[test]
    fn pairwise_covers_ordered_distinct_pairs() {
        let set = vec![
            dice("2,2,4,4,9,9"),
            dice("6,8,1,1,8,6"),
            dice("7,5,3,7,5,3"),
        ];
        let rows = pairwise(&set);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.first != r.second));
        let ab = rows.iter().find(|r| r.first == 0 && r.second == 1).unwrap();
        let ba = rows.iter().find(|r| r.first == 1 && r.second == 0).unwrap();
        assert_eq!(ab.odds.first_wins, ba.odds.second_wins);
        assert_eq!(ab.odds.draws, ba.odds.draws);
    }
}
