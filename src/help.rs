//! Help line rendering for key bindings.
//!
//! Renders the bindings of any [`KeyMap`] either as a single line
//! (`space start/pause • +/- duration • q quit`) or, with `show_all`, as
//! columns of grouped bindings. When a width is set, output that would not fit
//! is cut off and replaced by an ellipsis.

use crate::key::{self, KeyMap};
use lipgloss_extras::lipgloss::{self, Color, Style};

/// Styles applied to the parts of the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Ellipsis shown when items are cut off.
    pub ellipsis: Style,
    /// Key label in the short view.
    pub short_key: Style,
    /// Description in the short view.
    pub short_desc: Style,
    /// Separator between short items.
    pub short_separator: Style,
    /// Key label in the full view.
    pub full_key: Style,
    /// Description in the full view.
    pub full_desc: Style,
    /// Separator between full view columns.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(Color::from("#2d5a2d"));
        let desc_style = Style::new().foreground(Color::from("#555555"));
        let sep_style = Style::new().foreground(Color::from("#3C3C3C"));

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// Help view state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Render the full, multi-column view instead of the short line.
    pub show_all: bool,
    /// Maximum width in cells; 0 disables truncation.
    pub width: usize,
    /// Separator between short items.
    pub short_separator: String,
    /// Separator between full view columns.
    pub full_separator: String,
    /// Marker appended when items are cut off.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help view with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the truncation width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short or full view depending on `show_all`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders bindings on a single line. Disabled bindings are skipped.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let mut builder = String::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        for kb in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let key_part = self.styles.short_key.clone().inline(true).render(&help.key);
            let desc_part = self.styles.short_desc.clone().inline(true).render(&help.desc);
            let item = format!("{}{} {}", sep, key_part, desc_part);
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.should_add_item(total_width, item_width) {
                builder.push_str(&tail);
                break;
            }

            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    /// Renders groups of bindings as side-by-side columns.
    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);
        let separator_width = lipgloss::width_visible(&separator);

        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut total_width = 0;

        for group in groups {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    let key_part = self.styles.full_key.clone().inline(true).render(&help.key);
                    let desc_part = self.styles.full_desc.clone().inline(true).render(&help.desc);
                    format!("{} {}", key_part, desc_part)
                })
                .collect();
            if rows.is_empty() {
                continue;
            }

            let col_width = rows.iter().map(|r| lipgloss::width_visible(r)).max().unwrap_or(0);
            let needed = if columns.is_empty() {
                col_width
            } else {
                col_width + separator_width
            };
            if let Some(tail) = self.should_add_item(total_width, needed) {
                if !tail.is_empty() {
                    columns.push(vec![tail]);
                }
                break;
            }

            total_width += needed;
            let padded = rows
                .into_iter()
                .map(|r| {
                    let pad = col_width - lipgloss::width_visible(&r);
                    format!("{}{}", r, " ".repeat(pad))
                })
                .collect();
            columns.push(padded);
        }

        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(height);
        for row in 0..height {
            let mut line = String::new();
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    line.push_str(&separator);
                }
                match column.get(row) {
                    Some(cell) => line.push_str(cell),
                    None => {
                        let width = column.iter().map(|c| lipgloss::width_visible(c)).max().unwrap_or(0);
                        line.push_str(&" ".repeat(width));
                    }
                }
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    // None when the item fits; otherwise the tail to append (possibly empty).
    fn should_add_item(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width > 0 && total_width + item_width > self.width {
            let tail = format!(
                " {}",
                self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
            );
            if total_width + lipgloss::width_visible(&tail) < self.width {
                return Some(tail);
            }
            return Some(String::new());
        }
        None
    }
}
