use serde::{Deserialize, Serialize};

/// Full state of a single board cell, hidden information included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    /// Mines among the surrounding cells, only meaningful when `mine` is false.
    pub adjacent: u8,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    pub const fn view(self) -> CellView {
        if self.revealed {
            if self.mine {
                CellView::Mine
            } else if self.adjacent == 0 {
                CellView::Blank
            } else {
                CellView::Digit(self.adjacent)
            }
        } else if self.flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }
}

/// What the player gets to see of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    /// Revealed with no adjacent mines.
    Blank,
    Digit(u8),
    /// Only shown once the game is lost.
    Mine,
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Flagged => '*',
            Self::Blank => '/',
            Self::Digit(count) => (b'0' + count) as char,
            Self::Mine => 'X',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_is_hidden_by_reveal() {
        let cell = Cell {
            adjacent: 2,
            revealed: true,
            flagged: true,
            ..Default::default()
        };
        assert_eq!(cell.view(), CellView::Digit(2));
    }

    #[test]
    fn symbols_match_text_board() {
        assert_eq!(CellView::Hidden.symbol(), '.');
        assert_eq!(CellView::Flagged.symbol(), '*');
        assert_eq!(CellView::Blank.symbol(), '/');
        assert_eq!(CellView::Digit(8).symbol(), '8');
        assert_eq!(CellView::Mine.symbol(), 'X');
    }
}
