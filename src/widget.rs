//! The pomodoro widget: timer, tree and controls in one bubbletea-rs model.
//!
//! Every user interaction is turned into a [`Command`] and handed to
//! [`Model::dispatch`], which mutates the state synchronously. Key presses,
//! mouse clicks and the once-per-second tick all go through the same path, so
//! the whole widget can be driven headless in tests.
//!
//! # Layout
//!
//! ```text
//! ╭─────────────────────────────────────────╮
//! │ ✕                                    ▶  │
//! │                    0                    │
//! │                  0   0                  │
//! │                     ...                 │
//! │       0   0   0   0   0   1   0   1     │
//! │                   ███                   │
//! │              −   05:00   +              │
//! ╰─────────────────────────────────────────╯
//! space play • + more • - less • q quit
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use binary_pomodoro::widget::{Command, Model, Outcome};
//!
//! let mut widget = Model::new(1);
//! widget.dispatch(Command::Toggle);
//! widget.dispatch(Command::Tick);
//!
//! assert_eq!(widget.timer().display_time(), "00:59");
//! assert_eq!(widget.dispatch(Command::Close), Outcome::Quit);
//! ```

use crate::canvas::Canvas;
use crate::help;
use crate::key::{self, KeyMap};
use crate::timer::{Tick, TimerModel, DEFAULT_MINUTES};
use crate::tree::{Glyph, TreeRenderer};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use lipgloss_extras::lipgloss::{Color, Style};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

// Internal ID management for widget instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

static OPTIONS: OnceCell<Options> = OnceCell::new();

/// How often the countdown advances.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Border color changes shown after the countdown completes.
pub const FLASH_COUNT: u8 = 6;
/// The tree never shows less than this share of its leaves.
pub const MIN_TREE_GROWTH: f64 = 25.0;
/// Pixel size of the tree canvas.
pub const CANVAS_WIDTH: f64 = 290.0;
/// Pixel size of the tree canvas.
pub const CANVAS_HEIGHT: f64 = 260.0;
/// Terminal columns the canvas is rasterized to.
pub const GRID_COLS: usize = 41;
/// Terminal rows the canvas is rasterized to.
pub const GRID_ROWS: usize = 16;

// Frame rows, relative to the top border.
const TOP_BAR_ROW: u16 = 1;
const CONTROLS_ROW: u16 = 2 + GRID_ROWS as u16;
const FRAME_HEIGHT: u16 = CONTROLS_ROW + 2;
const FRAME_WIDTH: u16 = GRID_COLS as u16 + 2;
// Frame columns of the top bar buttons.
const CLOSE_COL: u16 = 2;
const PLAY_COLS: (u16, u16) = (FRAME_WIDTH - 4, FRAME_WIDTH - 2);

const CONTROL_GAP: &str = "   ";

/// Startup options for widgets created through [`BubbleTeaModel::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Initial countdown length in minutes.
    pub minutes: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_MINUTES,
        }
    }
}

/// Sets the options used by [`BubbleTeaModel::init`]. Only the first call
/// takes effect; returns whether this call did.
pub fn configure(options: Options) -> bool {
    OPTIONS.set(options).is_ok()
}

/// Something the user (or the clock) asked the widget to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or pause; restarts a completed countdown.
    Toggle,
    /// One minute more, only while stopped.
    Increase,
    /// One minute less, only while stopped.
    Decrease,
    /// Quit the widget.
    Close,
    /// Pointer pressed on the widget at terminal cell `(x, y)`.
    DragStart {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
    },
    /// Pointer moved to `(x, y)` while pressed.
    DragMove {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
    },
    /// Pointer released.
    DragEnd,
    /// One second passed.
    Tick,
}

/// Result of [`Model::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running.
    Continue,
    /// The widget asked to be closed.
    Quit,
}

/// Completion animation: the border alternates colors once per tick until
/// the counter runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flash {
    remaining: u8,
}

impl Flash {
    /// Starts a fresh animation.
    pub fn arm(&mut self) {
        self.remaining = FLASH_COUNT;
    }

    /// Stops the animation immediately.
    pub fn cancel(&mut self) {
        self.remaining = 0;
    }

    /// Moves the animation one step forward.
    pub fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Whether the animation is still running.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Steps left.
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Whether the current step shows the highlight color.
    pub fn highlighted(&self) -> bool {
        self.remaining % 2 == 1
    }
}

/// Colors for the frame and controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Border and button color.
    pub accent: String,
    /// Border color on highlighted flash steps.
    pub highlight: String,
    /// Time label and play icon.
    pub text: String,
    /// Close button.
    pub close: String,
    /// Close button while the pointer is over it.
    pub close_hover: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: "#2d5a2d".to_string(),
            highlight: "#00ff41".to_string(),
            text: "#ffffff".to_string(),
            close: "#555555".to_string(),
            close_hover: "#ff4444".to_string(),
        }
    }
}

/// Key bindings of the widget.
#[derive(Debug, Clone)]
pub struct WidgetKeyMap {
    /// Start or pause.
    pub toggle: key::Binding,
    /// Add a minute.
    pub increase: key::Binding,
    /// Remove a minute.
    pub decrease: key::Binding,
    /// Show or hide the full help.
    pub help: key::Binding,
    /// Quit.
    pub close: key::Binding,
}

impl Default for WidgetKeyMap {
    fn default() -> Self {
        Self {
            toggle: key::Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "play"),
            increase: key::Binding::new(vec![KeyCode::Char('+'), KeyCode::Char('='), KeyCode::Up])
                .with_help("+", "more"),
            decrease: key::Binding::new(vec![KeyCode::Char('-'), KeyCode::Down])
                .with_help("-", "less"),
            help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "help"),
            close: key::Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Esc, KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl KeyMap for WidgetKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.toggle, &self.increase, &self.decrease, &self.close]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.toggle, &self.close],
            vec![&self.increase, &self.decrease],
            vec![&self.help],
        ]
    }
}

/// Message that advances the countdown.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Widget the tick belongs to.
    pub id: i64,
}

/// The widget state.
#[derive(Debug, Clone)]
pub struct Model {
    timer: TimerModel,
    tree: TreeRenderer,
    canvas: Canvas,
    glyphs: Vec<Glyph>,
    flash: Flash,
    offset: (u16, u16),
    drag_anchor: Option<(u16, u16)>,
    close_hovered: bool,
    id: i64,

    /// Key bindings.
    pub keymap: WidgetKeyMap,
    /// Help line.
    pub help: help::Model,
    /// Frame colors.
    pub theme: Theme,
}

impl Model {
    /// Creates a stopped widget with a countdown of `minutes` (clamped to
    /// 1-60) and draws the initial tree.
    pub fn new(minutes: u32) -> Self {
        let mut model = Self {
            timer: TimerModel::new(minutes as i64),
            tree: TreeRenderer::new(),
            canvas: Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            glyphs: Vec::new(),
            flash: Flash::default(),
            offset: (0, 0),
            drag_anchor: None,
            close_hovered: false,
            id: next_id(),
            keymap: WidgetKeyMap::default(),
            help: help::Model::new().with_width(FRAME_WIDTH as usize),
            theme: Theme::default(),
        };
        model.redraw_tree();
        model
    }

    /// Creates a widget from startup options.
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.minutes)
    }

    /// Unique id used to route tick messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The countdown.
    pub fn timer(&self) -> &TimerModel {
        &self.timer
    }

    /// The leaves currently drawn.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// The completion animation.
    pub fn flash(&self) -> Flash {
        self.flash
    }

    /// How far the widget has been dragged, in columns and rows.
    pub fn offset(&self) -> (u16, u16) {
        self.offset
    }

    /// Applies a command.
    ///
    /// This is the only place the widget state changes; key presses, clicks
    /// and ticks are all translated into a [`Command`] first. Only
    /// [`Command::Close`] yields [`Outcome::Quit`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binary_pomodoro::timer::TimerState;
    /// use binary_pomodoro::widget::{Command, Model, Outcome};
    ///
    /// let mut widget = Model::new(1);
    /// widget.dispatch(Command::Increase);
    /// assert_eq!(widget.timer().display_time(), "02:00");
    ///
    /// widget.dispatch(Command::Toggle);
    /// for _ in 0..120 {
    ///     widget.dispatch(Command::Tick);
    /// }
    /// assert_eq!(widget.timer().state(), TimerState::Completed);
    /// assert!(widget.flash().is_active());
    ///
    /// // Duration changes are ignored while the countdown runs.
    /// widget.dispatch(Command::Toggle);
    /// widget.dispatch(Command::Increase);
    /// assert_eq!(widget.timer().display_time(), "02:00");
    ///
    /// assert_eq!(widget.dispatch(Command::Close), Outcome::Quit);
    /// ```
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        match command {
            Command::Toggle => {
                self.flash.cancel();
                self.timer.toggle();
                log::info!(
                    "timer {} with {} left",
                    self.timer.state(),
                    self.timer.display_time()
                );
                self.redraw_tree();
            }
            Command::Increase => self.adjust_minutes(1),
            Command::Decrease => self.adjust_minutes(-1),
            Command::Close => {
                log::info!("closing widget");
                return Outcome::Quit;
            }
            Command::DragStart { x, y } => self.drag_anchor = Some((x, y)),
            Command::DragMove { x, y } => {
                if let Some((ax, ay)) = self.drag_anchor {
                    self.offset.0 = shift(self.offset.0, x as i32 - ax as i32);
                    self.offset.1 = shift(self.offset.1, y as i32 - ay as i32);
                    self.drag_anchor = Some((x, y));
                }
            }
            Command::DragEnd => self.drag_anchor = None,
            Command::Tick => self.on_tick(),
        }
        Outcome::Continue
    }

    fn adjust_minutes(&mut self, delta: i64) {
        if self.timer.is_running() {
            log::debug!("ignoring duration change while running");
            return;
        }
        self.flash.cancel();
        self.timer.set_minutes(self.timer.minutes() as i64 + delta);
        log::debug!("duration set to {} min", self.timer.minutes());
        self.redraw_tree();
    }

    fn on_tick(&mut self) {
        self.flash.advance();
        if !self.timer.is_running() {
            return;
        }

        if self.timer.tick_transition() == Tick::Completed {
            log::info!("{} min countdown complete", self.timer.minutes());
            self.flash.arm();
        }
        self.redraw_tree();
    }

    fn redraw_tree(&mut self) {
        let growth = self.timer.progress_percent().max(MIN_TREE_GROWTH);
        self.glyphs = self
            .tree
            .draw_tree(&mut self.canvas, self.timer.minutes(), growth);
    }

    /// Current border color.
    pub fn border_color(&self) -> &str {
        if self.flash.is_active() && self.flash.highlighted() {
            &self.theme.highlight
        } else {
            &self.theme.accent
        }
    }

    /// Schedules the next tick.
    pub fn init(&self) -> Cmd {
        self.tick()
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id }) as Msg)
    }

    /// Handles ticks, key presses and mouse events.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id {
                return None;
            }
            self.dispatch(Command::Tick);
            return Some(self.tick());
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.help.matches(key_msg) {
                self.help.show_all = !self.help.show_all;
                return None;
            }
            let command = self.command_for_key(key_msg)?;
            return self.run(command);
        }

        if let Some(mouse_msg) = msg.downcast_ref::<MouseMsg>() {
            self.close_hovered = self.hit_test(mouse_msg.x, mouse_msg.y) == Some(Command::Close);
            let command = self.command_for_mouse(mouse_msg)?;
            return self.run(command);
        }

        None
    }

    fn run(&mut self, command: Command) -> Option<Cmd> {
        match self.dispatch(command) {
            Outcome::Quit => Some(bubbletea_rs::quit()),
            Outcome::Continue => None,
        }
    }

    fn command_for_key(&self, key_msg: &KeyMsg) -> Option<Command> {
        let km = &self.keymap;
        if km.close.matches(key_msg) {
            Some(Command::Close)
        } else if km.toggle.matches(key_msg) {
            Some(Command::Toggle)
        } else if km.increase.matches(key_msg) {
            Some(Command::Increase)
        } else if km.decrease.matches(key_msg) {
            Some(Command::Decrease)
        } else {
            None
        }
    }

    fn command_for_mouse(&self, mouse_msg: &MouseMsg) -> Option<Command> {
        let (x, y) = (mouse_msg.x, mouse_msg.y);
        match mouse_msg.button {
            MouseEventKind::Down(MouseButton::Left) => self
                .hit_test(x, y)
                .or_else(|| self.contains(x, y).then_some(Command::DragStart { x, y })),
            MouseEventKind::Drag(MouseButton::Left) => Some(Command::DragMove { x, y }),
            MouseEventKind::Up(MouseButton::Left) => Some(Command::DragEnd),
            _ => None,
        }
    }

    fn contains(&self, x: u16, y: u16) -> bool {
        let (ox, oy) = self.offset;
        x >= ox && y >= oy && x - ox < FRAME_WIDTH && y - oy < FRAME_HEIGHT
    }

    /// The button under terminal cell `(x, y)`, if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Command> {
        if !self.contains(x, y) {
            return None;
        }
        let (col, row) = (x - self.offset.0, y - self.offset.1);

        if row == TOP_BAR_ROW {
            if col.abs_diff(CLOSE_COL) <= 1 {
                return Some(Command::Close);
            }
            if (PLAY_COLS.0..=PLAY_COLS.1).contains(&col) {
                return Some(Command::Toggle);
            }
        } else if row == CONTROLS_ROW {
            let (minus, plus) = self.control_columns();
            if col.abs_diff(minus) <= 1 {
                return Some(Command::Decrease);
            }
            if col.abs_diff(plus) <= 1 {
                return Some(Command::Increase);
            }
        }
        None
    }

    // Frame columns of the − and + buttons.
    fn control_columns(&self) -> (u16, u16) {
        let width = self.controls_width();
        let left = (GRID_COLS - width) / 2;
        (1 + left as u16, (left + width) as u16)
    }

    fn controls_width(&self) -> usize {
        2 + 2 * CONTROL_GAP.len() + self.timer.display_time().width()
    }

    fn play_icon(&self) -> &'static str {
        if self.timer.is_running() {
            "❚❚"
        } else {
            "▶ "
        }
    }

    fn close_color(&self) -> &str {
        if self.close_hovered {
            &self.theme.close_hover
        } else {
            &self.theme.close
        }
    }

    fn top_bar(&self) -> String {
        let close = Style::new()
            .foreground(Color::from(self.close_color()))
            .render("✕");
        let icon = Style::new()
            .foreground(Color::from(self.theme.text.as_str()))
            .render(self.play_icon());
        let gap = GRID_COLS - 2 - self.play_icon().width() - "✕".width();
        format!(" {}{}{} ", close, " ".repeat(gap), icon)
    }

    fn controls(&self) -> String {
        let button = Style::new()
            .foreground(Color::from(self.theme.accent.as_str()))
            .bold(true);
        let label = Style::new()
            .foreground(Color::from(self.theme.text.as_str()))
            .bold(true);

        let width = self.controls_width();
        let left = (GRID_COLS - width) / 2;
        let right = GRID_COLS - width - left;
        format!(
            "{}{}{}{}{}{}{}",
            " ".repeat(left),
            button.render("−"),
            CONTROL_GAP,
            label.render(&self.timer.display_time()),
            CONTROL_GAP,
            button.render("+"),
            " ".repeat(right)
        )
    }

    /// Renders the framed widget, shifted by the drag offset.
    pub fn view(&self) -> String {
        let border = Style::new().foreground(Color::from(self.border_color()));
        let side = border.render("│");
        let horizontal = "─".repeat(GRID_COLS);

        let mut lines = Vec::with_capacity(FRAME_HEIGHT as usize + 2);
        lines.push(border.render(&format!("╭{}╮", horizontal)));
        lines.push(format!("{}{}{}", side, self.top_bar(), side));
        for row in self.canvas.rasterize(GRID_COLS, GRID_ROWS).lines() {
            lines.push(format!("{}{}{}", side, row, side));
        }
        lines.push(format!("{}{}{}", side, self.controls(), side));
        lines.push(border.render(&format!("╰{}╯", horizontal)));
        lines.extend(self.help.view(&self.keymap).lines().map(str::to_string));

        let indent = " ".repeat(self.offset.0 as usize);
        let mut out = "\n".repeat(self.offset.1 as usize);
        out.push_str(
            &lines
                .iter()
                .map(|line| format!("{}{}", indent, line))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        out
    }
}

fn shift(value: u16, delta: i32) -> u16 {
    (value as i32 + delta).clamp(0, u16::MAX as i32) as u16
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let options = OPTIONS.get().cloned().unwrap_or_default();
        let model = Model::from_options(&options);
        let cmd = model.init();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}
