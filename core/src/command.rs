use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    Reveal,
    ToggleFlag,
}

impl FromStr for CommandKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("free") {
            Ok(Self::Reveal)
        } else if s.eq_ignore_ascii_case("mine") {
            Ok(Self::ToggleFlag)
        } else {
            Err(GameError::InvalidCommand)
        }
    }
}

/// A player move with 0-based coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    pub row: Coord,
    pub col: Coord,
}

impl Command {
    pub const fn reveal(row: Coord, col: Coord) -> Self {
        Self {
            kind: CommandKind::Reveal,
            row,
            col,
        }
    }

    pub const fn toggle_flag(row: Coord, col: Coord) -> Self {
        Self {
            kind: CommandKind::ToggleFlag,
            row,
            col,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// Converts a 1-based user coordinate to a 0-based one.
fn parse_axis(token: &str) -> Result<Coord> {
    let value: i64 = token.parse().map_err(|_| GameError::InvalidCommand)?;
    value
        .checked_sub(1)
        .and_then(|value| Coord::try_from(value).ok())
        .ok_or(GameError::OutOfBounds)
}

/// Parses `"<col> <row> <free|mine>"` with 1-based coordinates, column first.
impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let (Some(col), Some(row), Some(kind), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(GameError::InvalidCommand);
        };

        let kind = kind.parse()?;
        let col = parse_axis(col)?;
        let row = parse_axis(row)?;
        Ok(Self { kind, row, col })
    }
}
