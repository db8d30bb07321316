//! Floating: a domed ghost with a wavy skirt and an automatic dark rim

use crate::canvas::Canvas;
use crate::palette::Inks;
use crate::seed::SeededRandom;

use super::{draw_eyes, fill_shape, shade_shape};

/// Skirt hem pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hem {
    Sine,
    Saw,
    Square,
}

impl Hem {
    /// Extra skirt length at column offset `x`.
    fn wave(self, x: i32) -> f64 {
        match self {
            Hem::Sine => (f64::from(x) * 0.8).sin() * 2.0,
            Hem::Saw => f64::from((x % 3).abs() - 1),
            Hem::Square => {
                if x % 2 == 0 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

pub(super) fn draw(canvas: &mut Canvas, cx: i32, cy: i32, ink: &Inks, rand: SeededRandom) {
    let width = rand.range(300, 5, 3);
    let height = rand.range(301, 7, 3);
    let (fx, fy) = (f64::from(cx), f64::from(cy));
    let (rx, ry) = (f64::from(width + 1), f64::from(height));

    // Dome above the center line, straight sides down to the skirt
    fill_shape(canvas, fx, fy, height.max(width + 1), ink.main, |dx, dy| {
        if dy < 0.0 {
            (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) < 1.0
        } else {
            dy <= 2.0 && dx.abs() < rx
        }
    });

    let hem = match rand.pick(302, 3) {
        0 => Hem::Sine,
        1 => Hem::Saw,
        _ => Hem::Square,
    };
    for x in -width..=width {
        let bottom = 6.0 + hem.wave(x);
        let mut y = 2.0;
        while y < bottom {
            canvas.plot(fx + f64::from(x), fy + y, ink.main);
            y += 1.0;
        }
    }

    // Translucent glow, kept inside the body
    let glow = rand.range(303, 3, 2);
    let gx = -width + rand.pick(304, 3) as i32 + 1;
    let gy = -height + rand.pick(305, 3) as i32 + 2;
    let g = f64::from(glow);
    shade_shape(canvas, fx + f64::from(gx), fy + f64::from(gy), glow, ink.main, ink.light, |dx, dy| {
        dx * dx + dy * dy < g * g
    });

    // Rim: every body cell touching empty space turns dark
    let mut rim = Vec::new();
    for y in cy - height - 1..=cy + 10 {
        for x in cx - width - 1..=cx + width + 1 {
            if canvas.get_pixel(x, y) == Some(ink.main) && canvas.touches_empty(x, y) {
                rim.push((x, y));
            }
        }
    }
    for (x, y) in rim {
        canvas.set_pixel(x, y, ink.dark);
    }

    // Optional floating sparkles
    if rand.chance(307) {
        for (x, y) in [(-width - 3, -2), (-width - 2, 2), (width + 3, -3), (width + 2, 1)] {
            canvas.set_pixel(cx + x, cy + y, ink.accent);
        }
    }

    let eye_y = cy - 2 + rand.pick(306, 3) as i32 - 1;
    draw_eyes(canvas, cx, eye_y, ink, rand);
}
