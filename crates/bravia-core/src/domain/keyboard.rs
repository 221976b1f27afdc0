//! On-screen keyboard grid domain entity.
//!
//! A keyboard is a rectangular grid addressed by `(col, row)` with `(0, 0)` in
//! the top-left corner.  Cells hold a single selectable character or are
//! *blank*: the TV draws nothing there and the cursor must route around them.
//!
//! Two grids are built in, one per script the TV's search keyboard offers:
//!
//! ```text
//! Latin (7×6)          Japanese (11×5, "_" = blank)
//! ABCDEFG              あかさたなはまやらわ゛
//! HIJKLMN              いきしちにひみ、りを゜
//! OPQRSTU              うくすつぬふむゆるん小
//! VWXYZ12              えけせてねへめ。れ・ー
//! 3456789              おこそとのほもよろ__
//! 0______
//! ```
//!
//! Blanks only ever trail at the bottom of a column, so a vertical walk toward
//! any selectable cell is never obstructed.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder used in layout row strings for a blank (non-selectable) cell.
pub const BLANK_CELL: char = '_';

const LATIN_ROWS: &[&str] = &["ABCDEFG", "HIJKLMN", "OPQRSTU", "VWXYZ12", "3456789", "0"];

const JAPANESE_ROWS: &[&str] = &[
    "あかさたなはまやらわ゛",
    "いきしちにひみ、りを゜",
    "うくすつぬふむゆるん小",
    "えけせてねへめ。れ・ー",
    "おこそとのほもよろ__",
];

/// A cell coordinate on a keyboard grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Zero-based column, increasing to the right.
    pub col: usize,
    /// Zero-based row, increasing downward.
    pub row: usize,
}

impl GridPos {
    /// The top-left cell, where the TV places the cursor when its keyboard opens.
    pub const ORIGIN: GridPos = GridPos { col: 0, row: 0 };

    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Identifies one of the built-in keyboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Upper-case A–Z and the digits 0–9.
    Latin,
    /// Hiragana gojūon plus the dakuten, handakuten, small-form and long-vowel keys.
    Japanese,
}

impl LayoutKind {
    /// Returns the process-wide grid for this keyboard, building it on first use.
    pub fn layout(self) -> &'static KeyboardLayout {
        static LATIN: OnceLock<KeyboardLayout> = OnceLock::new();
        static JAPANESE: OnceLock<KeyboardLayout> = OnceLock::new();

        match self {
            LayoutKind::Latin => LATIN.get_or_init(|| builtin(LATIN_ROWS)),
            LayoutKind::Japanese => JAPANESE.get_or_init(|| builtin(JAPANESE_ROWS)),
        }
    }
}

/// Builds one of the static grids above.  Both are covered by tests, so a
/// failure here can only come from editing the row constants.
fn builtin(rows: &[&str]) -> KeyboardLayout {
    match KeyboardLayout::from_rows(rows) {
        Ok(layout) => layout,
        Err(e) => panic!("built-in keyboard layout is malformed: {e}"),
    }
}

/// Errors that can occur when building a keyboard grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The grid has no rows, or every row is empty.
    #[error("keyboard layout has no cells")]
    Empty,

    /// A character appears in more than one cell.
    #[error("character {ch:?} appears at both {first} and {second}")]
    DuplicateCharacter {
        ch: char,
        first: GridPos,
        second: GridPos,
    },
}

/// An immutable keyboard grid with a character → coordinate index.
///
/// Rows shorter than the widest row are padded with blank cells, so every row
/// has [`columns`](Self::columns) cells.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    /// Row-major cells; `None` is a blank.
    cells: Vec<Vec<Option<char>>>,
    columns: usize,
    index: HashMap<char, GridPos>,
}

impl KeyboardLayout {
    /// Builds a grid from row strings, one `char` per cell.
    ///
    /// [`BLANK_CELL`] marks a blank cell.  Short rows are padded with blanks.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Empty`] when there is no cell at all, and
    /// [`LayoutError::DuplicateCharacter`] when a character occurs twice.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let columns = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len());
        let mut index = HashMap::new();

        for (row, text) in rows.iter().enumerate() {
            let mut line: Vec<Option<char>> = text
                .as_ref()
                .chars()
                .map(|c| (c != BLANK_CELL).then_some(c))
                .collect();
            line.resize(columns, None);

            for (col, cell) in line.iter().enumerate() {
                let Some(ch) = *cell else { continue };
                let pos = GridPos::new(col, row);
                if let Some(first) = index.insert(ch, pos) {
                    return Err(LayoutError::DuplicateCharacter {
                        ch,
                        first,
                        second: pos,
                    });
                }
            }
            cells.push(line);
        }

        Ok(Self {
            cells,
            columns,
            index,
        })
    }

    /// Number of columns (the width of the widest row).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells walked around the grid's border: `2 × (columns + rows)`.
    pub fn perimeter(&self) -> usize {
        2 * (self.columns + self.rows())
    }

    /// Returns the character at `(col, row)`, or `None` for a blank cell or a
    /// coordinate outside the grid.
    pub fn cell_at(&self, col: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Returns `true` when `(col, row)` cannot be selected.
    ///
    /// Coordinates outside the grid count as blank.
    pub fn is_blank(&self, col: usize, row: usize) -> bool {
        self.cell_at(col, row).is_none()
    }

    /// Returns the coordinate of `ch`, or `None` when the grid cannot type it.
    pub fn locate(&self, ch: char) -> Option<GridPos> {
        self.index.get(&ch).copied()
    }

    /// Returns `true` when `ch` has a cell on this grid.
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Iterates over every selectable character and its coordinate, row by row.
    pub fn chars(&self) -> impl Iterator<Item = (char, GridPos)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|ch| (ch, GridPos::new(col, row))))
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
