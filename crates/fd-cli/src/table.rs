use comfy_table::{ContentArrangement, Table};

use fd_core::{Dice, pairwise};

/// Render the win/draw odds for every ordered pair of distinct dice.
pub fn odds_table(dice: &[Dice]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Dice 1",
        "Dice 2",
        "Dice 1 Wins %",
        "Dice 2 Wins %",
        "Draw %",
    ]);

    for row in pairwise(dice) {
        table.add_row(vec![
            dice[row.first].to_string(),
            dice[row.second].to_string(),
            format!("{:.2}", row.odds.first_wins),
            format!("{:.2}", row.odds.second_wins),
            format!("{:.2}", row.odds.draws),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_ordered_pair() {
        let dice: Vec<Dice> = ["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let rendered = odds_table(&dice).to_string();
        assert!(rendered.contains("Dice 1 Wins %"));
        assert!(rendered.contains("55.56"));
        assert!(rendered.contains("44.44"));
        assert!(rendered.contains("[7,5,3,7,5,3]"));
        assert_eq!(odds_table(&dice).row_count(), 6);
    }
}
