//! Binary Christmas tree: leaf geometry, reveal order and drawing.
//!
//! The tree has eight rows of digit "leaves", one leaf at the top growing to
//! eight at the bottom, 36 in total. The bottom row spells the timer duration
//! as an 8-bit binary number (most significant bit on the left); every other
//! leaf is a `0`. Leaves appear from the base upward as the growth percentage
//! rises.
//!
//! [`TreeRenderer::layout`] is the pure part: given a value and a growth
//! percentage it returns the visible [`Glyph`]s. [`TreeRenderer::draw_tree`]
//! additionally paints them onto a [`Canvas`] and remembers what it drew so
//! [`TreeRenderer::clear`] can take it down again.
//!
//! ```rust
//! use binary_pomodoro::tree::TreeRenderer;
//!
//! let renderer = TreeRenderer::new();
//! let glyphs = renderer.layout(5, 100.0);
//!
//! let bottom: String = glyphs
//!     .iter()
//!     .take(8)
//!     .rev()
//!     .map(|g| g.digit)
//!     .collect();
//! assert_eq!(bottom, "00000101");
//! ```

use crate::canvas::{Canvas, ItemId};

/// Leaves per row, top to bottom.
pub const ROW_SIZES: [usize; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
/// Total number of leaf slots.
pub const LEAF_COUNT: usize = 36;
/// Index of the row that carries the binary digits.
pub const BINARY_ROW: usize = ROW_SIZES.len() - 1;
/// Largest value the bottom row can show.
pub const MAX_BINARY_VALUE: u32 = 255;

// Trunk geometry relative to the tree base.
const TRUNK_TOP_OFFSET: f64 = 15.0;
const TRUNK_BOTTOM_OFFSET: f64 = 25.0;
const TRUNK_WIDTH: f64 = 12.0;
const TRUNK_DETAIL_LINES: usize = 3;

/// Where the tree sits on the canvas and how big it is.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    /// Horizontal center of the tree.
    pub center_x: f64,
    /// Y coordinate of the tree base (top of the trunk area).
    pub base_y: f64,
    /// Distance from the top of the tree to its base.
    pub tree_height: f64,
    /// Half-width of the bottom row.
    pub max_spread: f64,
    /// Leaf size before growth scaling.
    pub leaf_size: f64,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            center_x: 145.0,
            base_y: 230.0,
            tree_height: 200.0,
            max_spread: 95.0,
            leaf_size: 14.0,
        }
    }
}

/// Colors used for leaves and trunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Regular digit color.
    pub leaf: String,
    /// Color for emphasized `1` digits.
    pub leaf_glow: String,
    /// Trunk fill.
    pub trunk: String,
    /// Trunk detail lines.
    pub trunk_dark: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            leaf: "#00ff41".to_string(),
            leaf_glow: "#33ff66".to_string(),
            trunk: "#8B4513".to_string(),
            trunk_dark: "#5D3A1A".to_string(),
        }
    }
}

/// One leaf slot of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreePosition {
    /// Canvas x of the leaf center.
    pub x: f64,
    /// Canvas y of the leaf center.
    pub y: f64,
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index within the row, 0 on the left.
    pub col: usize,
    /// Leaf size before growth scaling.
    pub size: f64,
    /// Whether this leaf belongs to the binary (bottom) row.
    pub is_binary_row: bool,
}

/// A revealed leaf ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The slot this glyph occupies.
    pub position: TreePosition,
    /// `'0'` or `'1'`.
    pub digit: char,
    /// Position in the reveal order, 0 for the first leaf to appear.
    pub order: usize,
    /// Leaf size after growth scaling.
    pub size: f64,
    /// Font size derived from `size`.
    pub font_size: u32,
    /// Set for `1` digits, which render in the glow color.
    pub emphasized: bool,
}

/// Formats `value` as eight binary digits, clamping anything above 255.
pub fn binary_digits(value: u32) -> String {
    format!("{:08b}", value.min(MAX_BINARY_VALUE))
}

/// Number of leaves revealed at `growth_percent`, always within
/// `0..=total`.
pub fn visible_count(growth_percent: f64, total: usize) -> usize {
    let count = (growth_percent / 100.0 * total as f64).floor();
    if count.is_nan() || count <= 0.0 {
        return 0;
    }
    (count as usize).min(total)
}

/// Computes leaf positions and draws the tree onto a [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    /// Geometry of the tree.
    pub layout: TreeLayout,
    /// Leaf and trunk colors.
    pub palette: Palette,
    leaf_items: Vec<ItemId>,
    trunk_items: Vec<ItemId>,
}

impl TreeRenderer {
    /// Creates a renderer with the default layout and palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with a custom layout.
    pub fn with_layout(layout: TreeLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// All 36 leaf slots, top row first, left to right within a row.
    pub fn positions(&self) -> Vec<TreePosition> {
        let layout = &self.layout;
        let num_rows = ROW_SIZES.len() as f64;
        let row_spacing = layout.tree_height / (num_rows + 1.0);
        let start_y = layout.base_y - layout.tree_height;

        let mut positions = Vec::with_capacity(LEAF_COUNT);
        for (row, &num_leaves) in ROW_SIZES.iter().enumerate() {
            let y = start_y + (row + 1) as f64 * row_spacing;
            let spread = layout.max_spread * (row + 1) as f64 / num_rows;

            for col in 0..num_leaves {
                let x = if num_leaves == 1 {
                    layout.center_x
                } else {
                    layout.center_x - spread + col as f64 * (2.0 * spread / (num_leaves - 1) as f64)
                };
                positions.push(TreePosition {
                    x,
                    y,
                    row,
                    col,
                    size: layout.leaf_size,
                    is_binary_row: row == BINARY_ROW,
                });
            }
        }
        positions
    }

    /// The visible leaves for `binary_value` at `growth_percent`, in reveal
    /// order (bottom row first, right to left, then upward).
    ///
    /// Leaves grow from 70% to full size along the reveal order, so the most
    /// recently revealed leaf is always the largest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binary_pomodoro::tree::{TreeRenderer, LEAF_COUNT};
    ///
    /// let renderer = TreeRenderer::new();
    ///
    /// // Half grown: the 18 lowest leaves, starting with the bottom row.
    /// let glyphs = renderer.layout(25, 50.0);
    /// assert_eq!(glyphs.len(), LEAF_COUNT / 2);
    /// assert!(glyphs[..8].iter().all(|g| g.position.is_binary_row));
    /// assert!(glyphs[0].size < glyphs[17].size);
    ///
    /// // 25 is 00011001; the bottom row is revealed right to left.
    /// let bits: String = glyphs[..8].iter().rev().map(|g| g.digit).collect();
    /// assert_eq!(bits, "00011001");
    /// ```
    pub fn layout(&self, binary_value: u32, growth_percent: f64) -> Vec<Glyph> {
        let digits: Vec<char> = binary_digits(binary_value).chars().collect();
        let positions = self.positions();
        let visible = visible_count(growth_percent, positions.len());

        positions
            .into_iter()
            .rev()
            .take(visible)
            .enumerate()
            .map(|(order, position)| {
                let digit = if position.is_binary_row {
                    digits.get(position.col).copied().unwrap_or('0')
                } else {
                    '0'
                };
                let growth = if visible > 1 {
                    order as f64 / (visible - 1) as f64
                } else {
                    1.0
                };
                let size = position.size * (0.7 + 0.3 * growth);
                Glyph {
                    digit,
                    order,
                    size,
                    font_size: (size * 1.1) as u32,
                    emphasized: digit == '1',
                    position,
                }
            })
            .collect()
    }

    /// Replaces whatever this renderer drew before with the tree for
    /// `binary_value` at `growth_percent`. Returns the glyphs drawn.
    pub fn draw_tree(&mut self, canvas: &mut Canvas, binary_value: u32, growth_percent: f64) -> Vec<Glyph> {
        for id in self.leaf_items.drain(..) {
            canvas.delete(id);
        }
        self.draw_trunk(canvas);

        let glyphs = self.layout(binary_value, growth_percent);
        for glyph in &glyphs {
            let color = if glyph.emphasized {
                &self.palette.leaf_glow
            } else {
                &self.palette.leaf
            };
            let id = canvas.create_text(
                glyph.position.x,
                glyph.position.y,
                &glyph.digit.to_string(),
                color,
                true,
            );
            self.leaf_items.push(id);
        }
        glyphs
    }

    /// Redraws the trunk below the tree base.
    pub fn draw_trunk(&mut self, canvas: &mut Canvas) {
        for id in self.trunk_items.drain(..) {
            canvas.delete(id);
        }

        let cx = self.layout.center_x;
        let top = self.layout.base_y - TRUNK_TOP_OFFSET;
        let bottom = self.layout.base_y + TRUNK_BOTTOM_OFFSET;
        let half = TRUNK_WIDTH / 2.0;

        let trunk = canvas.create_rect(cx - half, top, cx + half, bottom, &self.palette.trunk);
        self.trunk_items.push(trunk);

        for i in 0..TRUNK_DETAIL_LINES {
            let y = top + 8.0 + i as f64 * 10.0;
            let line = canvas.create_line(cx - half + 2.0, y, cx + half - 2.0, y, &self.palette.trunk_dark);
            self.trunk_items.push(line);
        }
    }

    /// Deletes every item this renderer put on `canvas`.
    pub fn clear(&mut self, canvas: &mut Canvas) {
        for id in self.leaf_items.drain(..).chain(self.trunk_items.drain(..)) {
            canvas.delete(id);
        }
    }

    /// Ids of the leaves currently on the canvas.
    pub fn leaf_items(&self) -> &[ItemId] {
        &self.leaf_items
    }

    /// Ids of the trunk parts currently on the canvas.
    pub fn trunk_items(&self) -> &[ItemId] {
        &self.trunk_items
    }
}
