//! Plain text board rendering

use tilefold_core::{Board, Outcome};

/// Draw the board as a right-aligned grid, `.` for empty cells
pub fn render_board(board: &Board) -> String {
    let width = board
        .max_value()
        .map(|v| v.to_string().len())
        .unwrap_or(1)
        .max(4);

    let mut out = String::new();
    for row in board.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell.value {
                Some(v) => format!("{:>width$}", v, width = width),
                None => format!("{:>width$}", ".", width = width),
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}

/// Banner shown when a session ends
pub fn outcome_banner(outcome: Outcome, target: u64) -> String {
    match outcome {
        Outcome::Victory => format!("*** You reached {}! ***", target),
        Outcome::Defeat => "*** No moves left. Game over. ***".to_string(),
        Outcome::InProgress => String::new(),
    }
}
