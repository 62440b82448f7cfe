use std::cell::Cell;
use std::rc::Rc;

const BASE_GLOW_SPEED: f64 = 0.05;
const GLOW_SPEED_STEP: f64 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Last known mouse position. Written by the `mousemove` listener, read by the
/// glow frame loop.
#[derive(Clone, Debug, Default)]
pub struct PointerState(Rc<Cell<Pointer>>);

impl PointerState {
    pub fn update(&self, x: f64, y: f64) {
        self.0.set(Pointer { x, y });
    }

    pub fn get(&self) -> Pointer {
        self.0.get()
    }
}

/// Cancels a self-rescheduling loop at its next iteration.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn glow_speed(index: usize) -> f64 {
    BASE_GLOW_SPEED + index as f64 * GLOW_SPEED_STEP
}

/// Reads an inline `left`/`top` value. Unset, unparsable and zero values all
/// yield `None` so the caller falls back to the layout box.
pub fn parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed != 0.0)
}

pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

/// One easing step for the glow element at `index`: centre it on the pointer,
/// moving a fixed fraction of the remaining distance.
pub fn next_glow_position(
    index: usize,
    pointer: Pointer,
    layout: GlowBox,
    inline_left: Option<f64>,
    inline_top: Option<f64>,
) -> (f64, f64) {
    let speed = glow_speed(index);
    let target_x = pointer.x - layout.width / 2.0;
    let target_y = pointer.y - layout.height / 2.0;
    let current_x = inline_left.unwrap_or(layout.left);
    let current_y = inline_top.unwrap_or(layout.top);

    (
        current_x + (target_x - current_x) * speed,
        current_y + (target_y - current_y) * speed,
    )
}
