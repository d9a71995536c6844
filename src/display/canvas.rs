//! Canvas: the drawing surface handed to the renderer.
//!
//! [`TextCanvas`] is a grid of cells stored in row-major order
//! (`index = y * width + x`). Text is laid out per grapheme cluster and
//! wide graphemes occupy a continuation cell to their right.

use bitflags::bitflags;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

bitflags! {
    /// Text style modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_0100;
    }
}

/// Font selection for subsequent text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Headline font.
    #[default]
    Primary,
    /// Body font.
    Secondary,
}

impl Font {
    /// Modifiers used to render this font on a text grid.
    pub const fn modifiers(self) -> Modifiers {
        match self {
            Self::Primary => Modifiers::BOLD,
            Self::Secondary => Modifiers::empty(),
        }
    }
}

/// Drawing primitives available to the renderer.
pub trait Canvas {
    /// Width in columns.
    fn width(&self) -> u16;

    /// Height in rows.
    fn height(&self) -> u16;

    /// Blank the whole surface.
    fn clear(&mut self);

    /// Select the font for following text.
    fn set_font(&mut self, font: Font);

    /// Draw text starting at (x, y), clipped at the right edge.
    ///
    /// Returns the number of columns used.
    fn draw_str(&mut self, x: u16, y: u16, text: &str) -> u16;

    /// Draw a centered action hint on the bottom row.
    fn draw_button_center(&mut self, label: &str);
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Grapheme shown in the cell, empty for a wide continuation.
    symbol: String,
    /// Display width (0 = continuation, 1 = normal, 2 = wide).
    width: u8,
    /// Style of the grapheme.
    modifiers: Modifiers,
}

impl Cell {
    /// A blank cell.
    pub fn blank() -> Self {
        Self {
            symbol: " ".to_string(),
            width: 1,
            modifiers: Modifiers::empty(),
        }
    }

    fn continuation(modifiers: Modifiers) -> Self {
        Self {
            symbol: String::new(),
            width: 0,
            modifiers,
        }
    }

    /// The grapheme in this cell.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Style of this cell.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether this cell is covered by the wide grapheme to its left.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.width == 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// Fixed-size text grid implementing [`Canvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCanvas {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    font: Font,
}

impl TextCanvas {
    /// Create a blank canvas.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Canvas dimensions must be non-zero");
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::blank(); size],
            width,
            height,
            font: Font::default(),
        }
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[cfg(test)]
    fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }

    /// Text of row `y` (without trailing padding), or `None` if out of range.
    pub fn row_text(&self, y: u16) -> Option<String> {
        let row = self.rows().nth(usize::from(y))?;
        let text: String = row.iter().map(Cell::symbol).collect();
        Some(text.trim_end().to_string())
    }

    /// All rows as text.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).filter_map(|y| self.row_text(y)).collect()
    }

    /// Write text with explicit modifiers.
    fn put_str(&mut self, x: u16, y: u16, text: &str, modifiers: Modifiers) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = u16::try_from(grapheme.width()).unwrap_or(u16::MAX);
            if width == 0 {
                continue;
            }
            if col.saturating_add(width) > self.width {
                break;
            }
            let Some(idx) = self.index_of(col, y) else {
                break;
            };

            self.cells[idx] = Cell {
                symbol: grapheme.to_string(),
                width: u8::try_from(width).unwrap_or(u8::MAX),
                modifiers,
            };
            for offset in 1..width {
                if let Some(next) = self.index_of(col + offset, y) {
                    self.cells[next] = Cell::continuation(modifiers);
                }
            }
            col += width;
        }
        col - x
    }
}

impl Canvas for TextCanvas {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn draw_str(&mut self, x: u16, y: u16, text: &str) -> u16 {
        self.put_str(x, y, text, self.font.modifiers())
    }

    fn draw_button_center(&mut self, label: &str) {
        let hint = format!("[ {label} ]");
        let hint_width = u16::try_from(hint.width()).unwrap_or(u16::MAX);
        let x = self.width.saturating_sub(hint_width) / 2;
        let y = self.height - 1;
        self.put_str(x, y, &hint, Modifiers::REVERSED);
    }
}
