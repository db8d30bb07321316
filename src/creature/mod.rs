//! Creature archetypes and their drawing routines
//!
//! Each archetype paints a body plan into a [`Canvas`] in a fixed order:
//! silhouette and limbs first, then the body fill, shading, highlights,
//! ornaments, and finally the eyes, which are allowed to overwrite anything
//! beneath them. Every size, count and style is derived from a
//! [`SeededRandom`] at a fixed offset owned by that parameter.

mod eyes;
mod floating;
mod legged;
mod slime;
mod winged;

use std::fmt;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::palette::Palette;
use crate::seed::SeededRandom;

pub use eyes::{draw_eyes, EyeStyle};

/// Offset used to pick the archetype from a seed.
const ARCHETYPE_OFFSET: u32 = 10;

/// One of the four creature body plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Round squishy blob with a mouth
    Slime,
    /// Mushroom cap on stubby legs
    Legged,
    /// Ghost with a wavy skirt
    Floating,
    /// Horned demon with bat wings
    Winged,
}

impl Archetype {
    /// All archetypes in selection order.
    pub const ALL: [Archetype; 4] =
        [Archetype::Slime, Archetype::Legged, Archetype::Floating, Archetype::Winged];

    /// Pick the archetype for a seed. Pure function of the seed.
    pub fn from_seed(rand: SeededRandom) -> Self {
        Self::ALL[rand.pick(ARCHETYPE_OFFSET, 4) as usize]
    }

    /// Paint this archetype centered at `(cx, cy)`.
    pub fn render(self, canvas: &mut Canvas, cx: i32, cy: i32, palette: &Palette, rand: SeededRandom) {
        let ink = palette.inks();
        match self {
            Archetype::Slime => slime::draw(canvas, cx, cy, &ink, rand),
            Archetype::Legged => legged::draw(canvas, cx, cy, &ink, rand),
            Archetype::Floating => floating::draw(canvas, cx, cy, &ink, rand),
            Archetype::Winged => winged::draw(canvas, cx, cy, &ink, rand),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Archetype::Slime => "slime",
            Archetype::Legged => "legged",
            Archetype::Floating => "floating",
            Archetype::Winged => "winged",
        };
        f.write_str(name)
    }
}

/// Paint every cell within `reach` of a (possibly fractional) center whose
/// offset satisfies `inside`. Membership is tested on the exact offsets; the
/// write position is floored.
pub(crate) fn fill_shape(
    canvas: &mut Canvas,
    cx: f64,
    cy: f64,
    reach: i32,
    ink: Rgba<u8>,
    inside: impl Fn(f64, f64) -> bool,
) {
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (fx, fy) = (f64::from(dx), f64::from(dy));
            if inside(fx, fy) {
                canvas.plot(cx + fx, cy + fy, ink);
            }
        }
    }
}

/// Like [`fill_shape`], but only recolors cells currently holding `from`.
pub(crate) fn shade_shape(
    canvas: &mut Canvas,
    cx: f64,
    cy: f64,
    reach: i32,
    from: Rgba<u8>,
    to: Rgba<u8>,
    inside: impl Fn(f64, f64) -> bool,
) {
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (fx, fy) = (f64::from(dx), f64::from(dy));
            let (x, y) = ((cx + fx).floor() as i32, (cy + fy).floor() as i32);
            if inside(fx, fy) && canvas.get_pixel(x, y) == Some(from) {
                canvas.set_pixel(x, y, to);
            }
        }
    }
}

/// Circle membership: `dx² + dy² < r²`.
pub(crate) fn in_circle(r: f64) -> impl Fn(f64, f64) -> bool {
    move |dx, dy| dx * dx + dy * dy < r * r
}

/// Axis-aligned ellipse membership with radii `rx`, `ry`.
pub(crate) fn in_ellipse(rx: f64, ry: f64) -> impl Fn(f64, f64) -> bool {
    move |dx, dy| (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) < 1.0
}

/// Diamond membership: `|dx| + |dy| < r`.
pub(crate) fn in_diamond(r: f64) -> impl Fn(f64, f64) -> bool {
    move |dx, dy| dx.abs() + dy.abs() < r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RESOLUTION;
    use crate::palette::select_palette;
    use crate::seed::hash_description;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_archetype_from_seed_is_pure() {
        for seed in 0..500 {
            let rand = SeededRandom::new(seed);
            assert_eq!(Archetype::from_seed(rand), Archetype::from_seed(rand));
        }
    }

    #[test]
    fn test_archetype_known_descriptions() {
        // ((seed + 10) % 100) % 4
        let pick = |d: &str| Archetype::from_seed(SeededRandom::from_description(d));
        assert_eq!(pick("fire dragon"), Archetype::Legged);
        assert_eq!(pick("slime"), Archetype::Floating);
        assert_eq!(pick("roar beast"), Archetype::Winged);
        assert_eq!(pick("火龙"), Archetype::Slime);
    }

    #[test]
    fn test_archetype_distribution_is_uniform() {
        let mut counts = [0u32; 4];
        let n = 2000;
        for seed in 0..n {
            let a = Archetype::from_seed(SeededRandom::new(seed * 7919 + 13));
            counts[Archetype::ALL.iter().position(|x| *x == a).unwrap()] += 1;
        }
        let expected = f64::from(n) / 4.0;
        let chi2: f64 =
            counts.iter().map(|&c| (f64::from(c) - expected).powi(2) / expected).sum();
        // 3 degrees of freedom, p = 0.001
        assert!(chi2 < 16.27, "chi-square {} for counts {:?}", chi2, counts);
    }

    #[test]
    fn test_every_archetype_draws_inside_canvas() {
        let palette = select_palette("test", 1, None);
        for archetype in Archetype::ALL {
            for seed in 0..100 {
                let mut canvas = Canvas::new(RESOLUTION);
                archetype.render(&mut canvas, 16, 16, &palette, SeededRandom::new(seed));
                assert!(canvas.filled() > 50, "{} seed {} drew too little", archetype, seed);
                assert!(canvas.filled() < (RESOLUTION * RESOLUTION) as usize);
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let seed = hash_description("purple ghost");
        let palette = select_palette("purple ghost", seed, None);
        for archetype in Archetype::ALL {
            let mut a = Canvas::default();
            let mut b = Canvas::default();
            archetype.render(&mut a, 16, 16, &palette, SeededRandom::new(seed));
            archetype.render(&mut b, 16, 16, &palette, SeededRandom::new(seed));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_fill_shape_strict_boundary() {
        let mut canvas = Canvas::new(9);
        fill_shape(&mut canvas, 4.0, 4.0, 4, RED, in_circle(2.0));
        // (2, 0) lies exactly on the boundary and is excluded.
        assert_eq!(canvas.get_pixel(6, 4), None);
        assert_eq!(canvas.get_pixel(5, 5), Some(RED));
        assert_eq!(canvas.filled(), 9);
    }

    #[test]
    fn test_fill_shape_floors_fractional_center() {
        let mut canvas = Canvas::new(8);
        fill_shape(&mut canvas, 3.5, 3.5, 0, RED, |_, _| true);
        assert_eq!(canvas.get_pixel(3, 3), Some(RED));
    }

    #[test]
    fn test_shade_shape_only_recolors_source() {
        let mut canvas = Canvas::new(5);
        canvas.set_pixel(2, 2, RED);
        canvas.set_pixel(3, 2, BLUE);
        shade_shape(&mut canvas, 2.0, 2.0, 2, RED, BLUE, in_diamond(3.0));
        assert_eq!(canvas.get_pixel(2, 2), Some(BLUE));
        assert_eq!(canvas.get_pixel(1, 2), None);
    }

    #[test]
    fn test_outline_ring_is_one_pixel_wide() {
        let mut canvas = Canvas::new(16);
        fill_shape(&mut canvas, 8.0, 8.0, 7, BLUE, in_circle(5.0));
        fill_shape(&mut canvas, 8.0, 8.0, 7, RED, in_circle(4.0));
        // Along the horizontal axis: 4 is ring, 3 is fill.
        assert_eq!(canvas.get_pixel(12, 8), Some(BLUE));
        assert_eq!(canvas.get_pixel(11, 8), Some(RED));
        assert_eq!(canvas.get_pixel(13, 8), None);
    }
}
