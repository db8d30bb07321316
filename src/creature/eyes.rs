//! Shared eye drawing, always the last pass of every archetype

use crate::canvas::Canvas;
use crate::palette::Inks;
use crate::seed::SeededRandom;

use super::{fill_shape, in_diamond};

/// The three eye looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeStyle {
    /// White diamond with a single pupil looking in one of five directions
    Round,
    /// Slanted single-pixel slash angled down toward the nose
    Angry,
    /// Oversized round whites with a chunky pupil
    Cute,
}

impl EyeStyle {
    fn from_seed(rand: SeededRandom) -> Self {
        match rand.pick(503, 3) {
            0 => EyeStyle::Round,
            1 => EyeStyle::Angry,
            _ => EyeStyle::Cute,
        }
    }
}

/// Pupil offset for look index 0..5: center, left, right, up, down.
fn look_offset(look: u32) -> (i32, i32) {
    match look {
        1 => (-1, 0),
        2 => (1, 0),
        3 => (0, -1),
        4 => (0, 1),
        _ => (0, 0),
    }
}

/// Draw a symmetric pair of eyes centered on `(cx, cy)`.
///
/// Style, spacing, size and gaze all come from `rand`. Each eye ends with a
/// highlight pixel up and inward from its pupil.
pub fn draw_eyes(canvas: &mut Canvas, cx: i32, cy: i32, ink: &Inks, rand: SeededRandom) {
    let spacing = rand.range(500, 3, 2);
    let size = rand.range(501, 1, 2);
    let style = EyeStyle::from_seed(rand);

    // (eye center x, direction toward the face center)
    for (ex, inward) in [(cx - spacing, 1), (cx + spacing, -1)] {
        let (px, py) = match style {
            EyeStyle::Round => {
                fill_shape(
                    canvas,
                    f64::from(ex),
                    f64::from(cy),
                    size,
                    ink.white,
                    in_diamond(f64::from(size + 1)),
                );
                let (ox, oy) = look_offset(rand.pick(502, 5));
                canvas.set_pixel(ex + ox, cy + oy, ink.black);
                (ex + ox, cy + oy)
            }
            EyeStyle::Angry => {
                canvas.set_pixel(ex - inward, cy - 1, ink.black);
                canvas.set_pixel(ex, cy, ink.black);
                canvas.set_pixel(ex + inward, cy + 1, ink.black);
                (ex, cy)
            }
            EyeStyle::Cute => {
                fill_shape(canvas, f64::from(ex), f64::from(cy), 2, ink.white, |dx, dy| {
                    dx * dx + dy * dy < 5.0
                });
                canvas.set_pixel(ex, cy, ink.black);
                canvas.set_pixel(ex + inward, cy, ink.black);
                canvas.set_pixel(ex, cy + 1, ink.black);
                canvas.set_pixel(ex, cy - 1, ink.eye_highlight);
                (ex, cy)
            }
        };

        canvas.set_pixel(px + inward, py - 1, ink.eye_highlight);
    }
}
