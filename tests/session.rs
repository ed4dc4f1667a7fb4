//! End-to-end runs of the widget through its public API.

use binary_pomodoro::prelude::*;
use binary_pomodoro::tree::{binary_digits, LEAF_COUNT};
use binary_pomodoro::widget::FLASH_COUNT;

fn bottom_row(glyphs: &[Glyph]) -> String {
    let mut row: Vec<&Glyph> = glyphs.iter().filter(|g| g.position.is_binary_row).collect();
    row.sort_by_key(|g| g.position.col);
    row.iter().map(|g| g.digit).collect()
}

#[test]
fn full_session_with_pause_and_restart() {
    let mut widget = PomodoroWidget::new(5);

    // Shorten to two minutes before starting.
    widget.dispatch(Command::Decrease);
    widget.dispatch(Command::Decrease);
    widget.dispatch(Command::Decrease);
    assert_eq!(widget.timer().display_time(), "02:00");
    assert_eq!(bottom_row(widget.glyphs()), binary_digits(2));

    widget.dispatch(Command::Toggle);
    for _ in 0..45 {
        widget.dispatch(Command::Tick);
    }
    assert_eq!(widget.timer().display_time(), "01:15");

    // Paused time does not count down.
    widget.dispatch(Command::Toggle);
    for _ in 0..10 {
        widget.dispatch(Command::Tick);
    }
    assert_eq!(widget.timer().state(), TimerState::Idle);
    assert_eq!(widget.timer().display_time(), "01:15");

    widget.dispatch(Command::Toggle);
    let mut ticks = 0;
    while widget.timer().is_running() {
        widget.dispatch(Command::Tick);
        ticks += 1;
    }
    assert_eq!(ticks, 75);
    assert_eq!(widget.timer().state(), TimerState::Completed);
    assert_eq!(widget.timer().display_time(), "00:00");
    assert_eq!(widget.glyphs().len(), LEAF_COUNT);
    assert_eq!(widget.flash().remaining(), FLASH_COUNT);

    // Starting again restarts the full duration.
    widget.dispatch(Command::Toggle);
    assert_eq!(widget.timer().state(), TimerState::Running);
    assert_eq!(widget.timer().display_time(), "02:00");
    assert!(!widget.flash().is_active());
    assert_eq!(widget.glyphs().len(), 9);
}

#[test]
fn tree_renderer_and_canvas_stay_in_sync() {
    let mut renderer = TreeRenderer::new();
    let mut canvas = Canvas::new(290.0, 260.0);

    for growth in [0.0, 10.0, 50.0, 75.0, 100.0] {
        let glyphs = renderer.draw_tree(&mut canvas, 60, growth);
        assert_eq!(renderer.leaf_items().len(), glyphs.len());
        assert_eq!(canvas.len(), glyphs.len() + renderer.trunk_items().len());
    }

    renderer.clear(&mut canvas);
    assert!(canvas.is_empty());
}

#[test]
fn sixty_minutes_in_binary() {
    let widget = PomodoroWidget::new(60);
    assert_eq!(bottom_row(widget.glyphs()), "00111100");
}
