//! Legged: a spotted mushroom cap standing on 3-4 stalks

use std::f64::consts::TAU;

use crate::canvas::Canvas;
use crate::palette::Inks;
use crate::seed::SeededRandom;

use super::{draw_eyes, fill_shape, in_circle, in_diamond, shade_shape};

pub(super) fn draw(canvas: &mut Canvas, cx: i32, cy: i32, ink: &Inks, rand: SeededRandom) {
    let (fx, fy) = (f64::from(cx), f64::from(cy));

    // Legs first so the cap rim covers their tops
    let legs = rand.range(200, 3, 2);
    let leg_spacing = if legs == 3 { 4.0 } else { 3.0 };
    for i in 0..legs {
        let leg_x = fx + (f64::from(i) - f64::from(legs - 1) / 2.0) * leg_spacing;
        let height = rand.range(250 + i as u32, 10, 3);
        let thick = rand.pick(260 + i as u32, 2) == 0;
        for y in cy + 5..cy + 5 + height {
            canvas.plot(leg_x, f64::from(y), ink.dark);
            if thick {
                canvas.plot(leg_x + 1.0, f64::from(y), ink.dark);
            }
        }
    }

    // Cap: outline disc one cell wider, then the fill, both cut flat below
    let head = rand.range(203, 7, 2);
    let r = f64::from(head);
    fill_shape(canvas, fx, fy, head + 1, ink.outline, |dx, dy| {
        dy <= 4.0 && dx * dx + dy * dy < (r + 1.0) * (r + 1.0)
    });
    fill_shape(canvas, fx, fy, head, ink.main, |dx, dy| dy <= 3.0 && dx * dx + dy * dy < r * r);

    // Underside of the cap
    shade_shape(canvas, fx, fy, head, ink.main, ink.dark, |dx, dy| {
        dy >= 2.0 && dx.abs() < r - 1.0
    });

    // Spots scattered around the upper cap
    let spots = rand.range(204, 3, 4);
    for i in 0..spots {
        let i = i as u32;
        let angle = f64::from(i) / f64::from(spots as u32) * TAU + f64::from(rand.roll(210 + i)) / 50.0;
        let distance = f64::from(rand.range(220 + i, 2, 4));
        let sx = (angle.cos() * distance).floor();
        let sy = (angle.sin() * distance).floor() - 2.0;
        let spot = rand.range(230 + i, 1, 2);
        shade_shape(canvas, fx + sx, fy + sy, spot, ink.main, ink.light, in_diamond(f64::from(spot + 1)));
    }

    // Optional antennae
    if rand.chance(209) {
        for (dir, base) in [(-1, cx - 2), (1, cx + 2)] {
            for step in 0..3 {
                canvas.set_pixel(base + dir * step, cy - head - step, ink.accent);
            }
            fill_shape(
                canvas,
                f64::from(base + dir * 3),
                f64::from(cy - head - 3),
                1,
                ink.light,
                in_circle(1.0),
            );
        }
    }

    let eye_y = cy + rand.pick(208, 3) as i32 - 1;
    draw_eyes(canvas, cx, eye_y, ink, rand);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::select_palette;

    #[test]
    fn test_cap_has_outline_rim() {
        let ink = select_palette("mushroom", 3, None).inks();
        for seed in 0..100 {
            let rand = SeededRandom::new(seed);
            let mut canvas = Canvas::default();
            draw(&mut canvas, 16, 16, &ink, rand);
            let head = rand.range(203, 7, 2);
            // Leftmost cell of the cap's widest row is outline.
            assert_eq!(canvas.get_pixel(16 - head, 16 - 1), Some(ink.outline), "seed {}", seed);
            assert_eq!(canvas.get_pixel(16 - head - 1, 16 - 1), None, "seed {}", seed);
        }
    }

    #[test]
    fn test_legs_reach_below_cap() {
        let ink = select_palette("mushroom", 3, None).inks();
        let rand = SeededRandom::new(11);
        let mut canvas = Canvas::default();
        draw(&mut canvas, 16, 16, &ink, rand);
        let darks = (21..32)
            .flat_map(|y| (0..32).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.get_pixel(x, y) == Some(ink.dark))
            .count();
        assert!(darks >= 3 * 5, "legs should draw below the cap, got {}", darks);
    }
}
