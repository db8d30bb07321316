//! Slime: a squashed blob with a ground shadow and a mouth

use crate::canvas::Canvas;
use crate::palette::Inks;
use crate::seed::SeededRandom;

use super::{draw_eyes, fill_shape, in_circle, in_ellipse, shade_shape};

pub(super) fn draw(canvas: &mut Canvas, cx: i32, cy: i32, ink: &Inks, rand: SeededRandom) {
    let size = rand.range(100, 9, 3);
    let squish = 0.8 + f64::from(rand.pick(101, 40)) / 100.0;
    let shadow_w = rand.range(102, 6, 3);
    let (fx, fy, r) = (f64::from(cx), f64::from(cy), f64::from(size));

    // Ground shadow
    fill_shape(
        canvas,
        fx,
        fy + r - 3.0,
        shadow_w,
        ink.outline,
        in_ellipse(f64::from(shadow_w), 3.0),
    );

    // Body with a dark rim two cells deep
    let body = |dx: f64, dy: f64| ((dx * dx) / (squish * squish) + dy * dy).sqrt();
    fill_shape(canvas, fx, fy, size + 2, ink.dark, |dx, dy| body(dx, dy) < r);
    fill_shape(canvas, fx, fy, size + 2, ink.main, |dx, dy| body(dx, dy) < r - 2.0);

    // Belly shading: lower half-disc centered halfway down
    let half = r / 2.0;
    shade_shape(canvas, fx, fy + half, size, ink.main, ink.dark, |dx, dy| {
        dy >= 0.0 && dx * dx + dy * dy < half * half
    });

    // Highlight in the upper-left quadrant
    let hx = -(size / 2) - 1 + rand.pick(103, 3) as i32;
    let hy = -(size / 2) - 1 + rand.pick(104, 3) as i32;
    fill_shape(canvas, fx + f64::from(hx), fy + f64::from(hy), 2, ink.light, in_circle(2.0));

    // Optional sprout on top
    if rand.chance(108) {
        let top = cy - size;
        canvas.set_pixel(cx, top, ink.outline);
        canvas.set_pixel(cx, top - 1, ink.outline);
        fill_shape(canvas, fx, f64::from(top - 2), 1, ink.accent, in_circle(1.5));
    }

    draw_mouth(canvas, cx, cy + 4 + rand.pick(107, 2) as i32, ink, rand);

    let eye_y = cy - 2 + rand.pick(105, 3) as i32 - 1;
    draw_eyes(canvas, cx, eye_y, ink, rand);
}

fn draw_mouth(canvas: &mut Canvas, cx: i32, y: i32, ink: &Inks, rand: SeededRandom) {
    match rand.pick(106, 3) {
        0 => {
            for dx in -2..=2 {
                canvas.set_pixel(cx + dx, y, ink.outline);
            }
        }
        1 => {
            canvas.set_pixel(cx - 2, y, ink.outline);
            for dx in -1..=1 {
                canvas.set_pixel(cx + dx, y + 1, ink.outline);
            }
            canvas.set_pixel(cx + 2, y, ink.outline);
        }
        _ => {
            for dx in -1..=1 {
                canvas.set_pixel(cx + dx, y, ink.outline);
            }
        }
    }
}
