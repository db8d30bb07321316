//! Winged: a round horned demon flanked by bat wings

use crate::canvas::Canvas;
use crate::palette::Inks;
use crate::seed::SeededRandom;

use super::{draw_eyes, fill_shape, in_circle, in_diamond, shade_shape};

/// Horn silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horns {
    /// Three-wide posts
    Straight,
    /// Tapering spikes
    Tapered,
    /// Single-pixel horns curving outward
    Curved,
}

pub(super) fn draw(canvas: &mut Canvas, cx: i32, cy: i32, ink: &Inks, rand: SeededRandom) {
    let body = rand.range(400, 5, 3);
    let wing = rand.range(401, 3, 2);
    let spread = rand.range(402, 10, 3);
    let pointed = rand.pick(403, 2) == 1;
    let (fx, fy, r) = (f64::from(cx), f64::from(cy), f64::from(body));

    // Wings and the struts joining them to the body
    for side in [-1, 1] {
        let wx = fx + f64::from(side * spread);
        if pointed {
            fill_shape(canvas, wx, fy, wing, ink.dark, in_diamond(f64::from(wing + 1)));
        } else {
            fill_shape(canvas, wx, fy, wing, ink.dark, in_circle(f64::from(wing)));
        }
        for x in body..spread {
            canvas.set_pixel(cx + side * x, cy - 1, ink.dark);
        }
    }

    // Outline ring, then body
    fill_shape(canvas, fx, fy, body + 1, ink.outline, in_circle(r + 1.0));
    fill_shape(canvas, fx, fy, body, ink.main, in_circle(r));

    // Belly shading and a highlight
    let half = r / 2.0;
    shade_shape(canvas, fx, fy + half, body, ink.main, ink.dark, |dx, dy| {
        dy >= 0.0 && dx * dx + dy * dy < half * half
    });
    shade_shape(canvas, fx - half, fy - half, 1, ink.main, ink.light, in_circle(1.5));

    let horns = match rand.pick(404, 3) {
        0 => Horns::Straight,
        1 => Horns::Tapered,
        _ => Horns::Curved,
    };
    draw_horns(canvas, cx, cy - body, horns, rand, ink);

    // Optional tail
    if rand.chance(408) {
        for step in 0..3 {
            canvas.set_pixel(cx + body + step, cy + body - 1 + step, ink.accent);
        }
        let (tx, ty) = (cx + body + 3, cy + body + 2);
        fill_shape(canvas, f64::from(tx), f64::from(ty), 1, ink.accent, in_diamond(2.0));
    }

    let eye_y = cy - 1 + rand.pick(407, 3) as i32 - 1;
    draw_eyes(canvas, cx, eye_y, ink, rand);
}

fn draw_horns(canvas: &mut Canvas, cx: i32, base_y: i32, horns: Horns, rand: SeededRandom, ink: &Inks) {
    let height = rand.range(405, 3, 3);
    let spacing = rand.range(406, 2, 2);

    for side in [-1, 1] {
        let hx = cx + side * spacing;
        match horns {
            Horns::Straight => {
                for y in base_y - height..=base_y {
                    for dx in -1..=1 {
                        canvas.set_pixel(hx + dx, y, ink.accent);
                    }
                }
            }
            Horns::Tapered => {
                for i in 0..height {
                    let w = (height - i) / 2;
                    for dx in -w..=w {
                        canvas.set_pixel(hx + dx, base_y - i, ink.accent);
                    }
                }
            }
            Horns::Curved => {
                for i in 0..height {
                    canvas.set_pixel(hx + side * (i / 2), base_y - i, ink.accent);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::select_palette;

    #[test]
    fn test_wings_on_both_sides() {
        let ink = select_palette("demon", 8, None).inks();
        for seed in 0..100 {
            let rand = SeededRandom::new(seed);
            let spread = rand.range(402, 10, 3);
            let mut canvas = Canvas::default();
            draw(&mut canvas, 16, 16, &ink, rand);
            assert_eq!(canvas.get_pixel(16 - spread, 16), Some(ink.dark), "seed {}", seed);
            assert_eq!(canvas.get_pixel(16 + spread, 16), Some(ink.dark), "seed {}", seed);
        }
    }

    #[test]
    fn test_horns_rise_above_body() {
        let ink = select_palette("demon", 8, None).inks();
        for seed in 0..100 {
            let rand = SeededRandom::new(seed);
            let body = rand.range(400, 5, 3);
            let mut canvas = Canvas::default();
            draw(&mut canvas, 16, 16, &ink, rand);
            let accents = (0..32)
                .filter(|&x| canvas.get_pixel(x, 16 - body - 1) == Some(ink.accent))
                .count();
            assert!(accents >= 2, "seed {} has {} horn cells", seed, accents);
        }
    }
}
