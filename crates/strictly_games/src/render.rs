//! Plain-text rendering of boards and results.

use strictly_memory::{BoardSnapshot, Outcome, Player, Position, Scoreboard};

/// Marker shown for face-down cards.
pub const HIDDEN: &str = "*";

/// Renders a board snapshot with 1-based row and column labels.
///
/// ```text
///   1 2 3 4
/// 1 * * A *
/// 2 * * * *
/// ```
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let dims = snapshot.dimensions();
    let label_width = dims.rows().to_string().len();
    let cell_width = dims.columns().to_string().len();

    let header = (1..=dims.columns())
        .map(|c| format!("{:>cell_width$}", c))
        .collect::<Vec<_>>()
        .join(" ");
    let mut out = format!("{:label_width$} {}\n", "", header);

    for (i, row) in snapshot.rows().enumerate() {
        let cells = row
            .iter()
            .map(|cell| {
                let shown = cell.symbol.map_or_else(|| HIDDEN.to_string(), |s| s.to_string());
                format!("{:>cell_width$}", shown)
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("{:>label_width$} {}\n", i + 1, cells));
    }
    out
}

/// A position as the player typed it (1-based).
pub fn display_position(pos: Position) -> String {
    format!("row {}, column {}", pos.row() + 1, pos.column() + 1)
}

/// Final score line plus the result.
pub fn render_final_scores(scores: &Scoreboard) -> String {
    let result = match scores.outcome() {
        Outcome::Winner(player) => format!("Player {} wins!", player.number()),
        Outcome::Draw => "It's a draw!".to_string(),
    };
    format!(
        "Game Over! Final scores: Player 1 - {}, Player 2 - {}\n{}",
        scores.get(Player::One),
        scores.get(Player::Two),
        result
    )
}
