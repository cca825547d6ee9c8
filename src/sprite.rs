/// The 16×16 1-bit ship sprite, loaded once at startup.
///
/// The on-disk format is deliberately dumb: 16 lines of 16 characters,
/// `#` for a lit pixel and `.` for a dark one.  Anything else is a fatal
/// startup error — the game cannot run without its ship.

use std::path::Path;

pub const SPRITE_SIZE: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    /// Failed to read the sprite file from disk.
    #[error("failed to read sprite: {0}")]
    Read(#[source] std::io::Error),

    /// The file does not contain exactly 16 rows.
    #[error("sprite has {0} rows, expected {SPRITE_SIZE}")]
    WrongRowCount(usize),

    /// A row is not exactly 16 cells wide.
    #[error("sprite row {row} has {len} cells, expected {SPRITE_SIZE}")]
    WrongRowWidth { row: usize, len: usize },

    /// A cell holds something other than `#` or `.`.
    #[error("sprite row {row}, column {col}: invalid cell {ch:?}")]
    BadCell { row: usize, col: usize, ch: char },
}

/// A 16×16 monochrome bitmap, one `u16` of column bits per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipSprite {
    rows: [u16; SPRITE_SIZE],
}

impl ShipSprite {
    /// Parse the text format.  Blank lines and trailing whitespace are not
    /// tolerated; the asset is fixed-size by contract.
    pub fn parse(text: &str) -> Result<Self, SpriteError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != SPRITE_SIZE {
            return Err(SpriteError::WrongRowCount(lines.len()));
        }
        let mut rows = [0u16; SPRITE_SIZE];
        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != SPRITE_SIZE {
                return Err(SpriteError::WrongRowWidth {
                    row,
                    len: cells.len(),
                });
            }
            for (col, &ch) in cells.iter().enumerate() {
                match ch {
                    '#' => rows[row] |= 1 << col,
                    '.' => {}
                    _ => return Err(SpriteError::BadCell { row, col, ch }),
                }
            }
        }
        Ok(ShipSprite { rows })
    }

    /// Load and parse the sprite asset from disk.
    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let text = std::fs::read_to_string(path).map_err(SpriteError::Read)?;
        Self::parse(&text)
    }

    /// Whether the pixel at (x, y) is lit.  Out-of-range lookups are dark.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= SPRITE_SIZE || y >= SPRITE_SIZE {
            return false;
        }
        self.rows[y] & (1 << x) != 0
    }
}
