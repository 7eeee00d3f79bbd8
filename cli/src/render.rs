use std::fmt::{self, Write};

use sweeper_core::{Coord, Snapshot};

/// Column header digit, wrapping past 9 on wide boards.
fn axis_digit(index: Coord) -> char {
    char::from(b'0' + (index + 1) % 10)
}

/// Renders the board as the framed text grid, rows and columns numbered from 1.
pub fn render(snapshot: &Snapshot, out: &mut impl Write) -> fmt::Result {
    let (rows, cols) = snapshot.size;
    let rule: String = "—".repeat(cols.into());

    let header: String = (0..cols).map(axis_digit).collect();
    writeln!(out, " │{header}│")?;
    writeln!(out, "—│{rule}│")?;
    for row in 0..rows {
        let line: String = (0..cols)
            .map(|col| snapshot.view_at((row, col)).symbol())
            .collect();
        writeln!(out, "{}|{line}|", u16::from(row) + 1)?;
    }
    writeln!(out, "—│{rule}│")
}

pub fn render_to_string(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render(snapshot, &mut out);
    out
}
