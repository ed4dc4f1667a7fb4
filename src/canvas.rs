//! Owned drawing surface for the tree renderer.
//!
//! Items are placed in pixel coordinates, addressed by the [`ItemId`] returned
//! when they are created, and deleted individually. Whoever drew an item is
//! responsible for deleting it again; the canvas never clears itself.
//!
//! [`Canvas::rasterize`] maps the pixel space onto a terminal cell grid so the
//! same geometry can be shown at any size.
//!
//! ```rust
//! use binary_pomodoro::canvas::Canvas;
//!
//! let mut canvas = Canvas::new(100.0, 100.0);
//! let id = canvas.create_text(50.0, 50.0, "1", "#00ff41", true);
//! assert_eq!(canvas.rasterize(10, 10).plain()[5], "     1    ");
//!
//! canvas.delete(id);
//! assert!(canvas.is_empty());
//! ```

use lipgloss_extras::lipgloss::{Color, Style};
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthChar;

/// Handle to an item on a [`Canvas`].
pub type ItemId = u64;

/// A drawable primitive in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Text centered on its anchor point.
    Text {
        /// Anchor x.
        x: f64,
        /// Anchor y.
        y: f64,
        /// The text itself.
        text: String,
        /// Foreground color as a hex string.
        color: String,
        /// Render in bold.
        bold: bool,
    },
    /// Filled rectangle between two corners.
    Rect {
        /// Left edge.
        x0: f64,
        /// Top edge.
        y0: f64,
        /// Right edge.
        x1: f64,
        /// Bottom edge.
        y1: f64,
        /// Fill color as a hex string.
        fill: String,
    },
    /// Straight line between two points.
    Line {
        /// Start x.
        x0: f64,
        /// Start y.
        y0: f64,
        /// End x.
        x1: f64,
        /// End y.
        y1: f64,
        /// Stroke color as a hex string.
        color: String,
    },
}

/// Pixel-space drawing surface holding items by id.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: f64,
    height: f64,
    next_id: ItemId,
    items: BTreeMap<ItemId, Item>,
}

impl Canvas {
    /// Creates an empty canvas of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            next_id: 0,
            items: BTreeMap::new(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    fn insert(&mut self, item: Item) -> ItemId {
        self.next_id += 1;
        self.items.insert(self.next_id, item);
        self.next_id
    }

    /// Places text centered on `(x, y)`.
    pub fn create_text(&mut self, x: f64, y: f64, text: &str, color: &str, bold: bool) -> ItemId {
        self.insert(Item::Text {
            x,
            y,
            text: text.to_string(),
            color: color.to_string(),
            bold,
        })
    }

    /// Places a filled rectangle.
    pub fn create_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, fill: &str) -> ItemId {
        self.insert(Item::Rect {
            x0,
            y0,
            x1,
            y1,
            fill: fill.to_string(),
        })
    }

    /// Places a line.
    pub fn create_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: &str) -> ItemId {
        self.insert(Item::Line {
            x0,
            y0,
            x1,
            y1,
            color: color.to_string(),
        })
    }

    /// Removes an item. Unknown ids are ignored.
    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    /// Looks up an item.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the canvas holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Live items in creation order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Maps the canvas onto a `cols` × `rows` grid of terminal cells.
    ///
    /// Items are painted in creation order, so later items cover earlier ones.
    /// Anything falling outside the grid is clipped.
    pub fn rasterize(&self, cols: usize, rows: usize) -> Grid {
        let mut grid = Grid::blank(cols, rows);
        if cols == 0 || rows == 0 || self.width <= 0.0 || self.height <= 0.0 {
            return grid;
        }

        let sx = cols as f64 / self.width;
        let sy = rows as f64 / self.height;

        for item in self.items.values() {
            match item {
                Item::Rect {
                    x0,
                    y0,
                    x1,
                    y1,
                    fill,
                } => {
                    let (c0, c1) = span(*x0 * sx, *x1 * sx);
                    let (r0, r1) = span(*y0 * sy, *y1 * sy);
                    for row in r0..=r1 {
                        for col in c0..=c1 {
                            grid.paint(col, row, Cell::styled('█', fill, false));
                        }
                    }
                }
                Item::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    color,
                } => {
                    let (c0, r0) = ((*x0 * sx).floor(), (*y0 * sy).floor());
                    let (c1, r1) = ((*x1 * sx).floor(), (*y1 * sy).floor());
                    let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1.0) as i64;
                    let glyph = if (r1 - r0).abs() > (c1 - c0).abs() {
                        '│'
                    } else {
                        '─'
                    };
                    for step in 0..=steps {
                        let t = step as f64 / steps as f64;
                        let col = (c0 + (c1 - c0) * t).round() as i64;
                        let row = (r0 + (r1 - r0) * t).round() as i64;
                        grid.paint(col, row, Cell::styled(glyph, color, false));
                    }
                }
                Item::Text {
                    x,
                    y,
                    text,
                    color,
                    bold,
                } => {
                    let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
                    let row = (*y * sy).floor() as i64;
                    let mut col = (*x * sx).floor() as i64 - (width / 2) as i64;
                    for ch in text.chars() {
                        grid.paint(col, row, Cell::styled(ch, color, *bold));
                        col += ch.width().unwrap_or(0).max(1) as i64;
                    }
                }
            }
        }

        grid
    }
}

// Cell range covered by a pixel span, inclusive on both ends.
fn span(a: f64, b: f64) -> (i64, i64) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let end = if hi.fract() == 0.0 && hi > lo { hi - 1.0 } else { hi };
    (lo.floor() as i64, end.floor() as i64)
}

/// A single terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Character shown.
    pub ch: char,
    /// Foreground color, if any.
    pub color: Option<String>,
    /// Bold attribute.
    pub bold: bool,
}

impl Cell {
    fn blank() -> Self {
        Self {
            ch: ' ',
            color: None,
            bold: false,
        }
    }

    fn styled(ch: char, color: &str, bold: bool) -> Self {
        Self {
            ch,
            color: Some(color.to_string()),
            bold,
        }
    }

    fn same_style(&self, other: &Cell) -> bool {
        self.color == other.color && self.bold == other.bold
    }
}

/// Result of [`Canvas::rasterize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    fn blank(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows: vec![vec![Cell::blank(); cols]; rows],
        }
    }

    fn paint(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col as usize >= self.cols {
            return;
        }
        if let Some(line) = self.rows.get_mut(row as usize) {
            line[col as usize] = cell;
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// The cell at `(col, row)`.
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|line| line.get(col))
    }

    /// Unstyled lines, one string per row.
    pub fn plain(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|line| line.iter().map(|cell| cell.ch).collect())
            .collect()
    }

    /// Styled lines, one string per row. Runs of equally styled cells share a
    /// single escape sequence.
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|line| render_line(line)).collect()
    }
}

fn render_line(line: &[Cell]) -> String {
    let mut out = String::new();
    let mut start = 0;

    while start < line.len() {
        let head = &line[start];
        let mut end = start + 1;
        while end < line.len() && line[end].same_style(head) {
            end += 1;
        }

        let run: String = line[start..end].iter().map(|cell| cell.ch).collect();
        match &head.color {
            Some(color) => {
                let style = Style::new()
                    .foreground(Color::from(color.as_str()))
                    .bold(head.bold);
                out.push_str(&style.render(&run));
            }
            None => out.push_str(&run),
        }
        start = end;
    }

    out
}
