//! One-shot procedural city layout
//!
//! Runs once at startup and produces the static vertex list: a ground
//! plane, a cross of main roads through the origin, and random towers in
//! blue/purple hues with an occasional emissive window shell. The
//! simulation never reads any of this; it only exists on screen.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::ROAD_WIDTH;
use crate::renderer::shapes::{push_box_at, push_ground};
use crate::renderer::vertex::{Vertex, colors};

/// Grid cells out from the center in each direction
const GRID_SIZE: i32 = 15;
/// Distance between cell centers
const CELL_SPACING: f32 = 180.0;
/// Probability that a non-road cell gets a building
const BUILDING_DENSITY: f64 = 0.7;

/// Build the whole city into one static mesh. Deterministic per seed.
pub fn build_city(seed: u64) -> Vec<Vertex> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut out = Vec::new();

    push_ground(&mut out, 3000.0, 0.0, colors::GROUND);

    for x in -GRID_SIZE..=GRID_SIZE {
        for z in -GRID_SIZE..=GRID_SIZE {
            let cx = x as f32 * CELL_SPACING;
            let cz = z as f32 * CELL_SPACING;
            if x == 0 || z == 0 {
                // Main roads form a cross through the origin
                push_road_segment(&mut out, cx, cz, x == 0);
            } else if rng.random_bool(BUILDING_DENSITY) {
                push_building(&mut out, &mut rng, cx, cz);
            }
        }
    }

    log::info!("City built: {} vertices", out.len());
    out
}

fn push_road_segment(out: &mut Vec<Vertex>, x: f32, z: f32, is_vertical: bool) {
    let (w, d) = if is_vertical {
        (ROAD_WIDTH, CELL_SPACING)
    } else {
        (CELL_SPACING, ROAD_WIDTH)
    };
    push_box_at(
        out,
        Vec3::new(x, 0.1, z),
        Vec3::new(w / 2.0, 0.1, d / 2.0),
        colors::ROAD,
    );
}

fn push_building(out: &mut Vec<Vertex>, rng: &mut Pcg32, x: f32, z: f32) {
    let height: f32 = 40.0 + rng.random_range(0.0..120.0);
    let width: f32 = 30.0 + rng.random_range(0.0..20.0);

    // Blue/purple hues, low lightness for the night skyline
    let hue = rng.random_range(0.6..0.7);
    let (r, g, b) = hsl_to_rgb(hue, 0.5, 0.1);
    push_box_at(
        out,
        Vec3::new(x, height / 2.0, z),
        Vec3::new(width / 2.0, height / 2.0, width / 2.0),
        [r, g, b, 1.0],
    );

    // Half the towers get a translucent lit-window shell
    if rng.random_bool(0.5) {
        push_box_at(
            out,
            Vec3::new(x, height / 2.0, z),
            Vec3::new(
                (width + 0.5) / 2.0,
                height * 0.8 / 2.0,
                (width + 0.5) / 2.0,
            ),
            colors::WINDOWS,
        );
    }
}

/// HSL to RGB, all components in [0, 1]
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_is_deterministic_per_seed() {
        let a = build_city(42);
        let b = build_city(42);
        assert_eq!(a.len(), b.len());
        for (va, vb) in a.iter().zip(&b) {
            assert_eq!(va.position, vb.position);
            assert_eq!(va.color, vb.color);
        }
        let c = build_city(43);
        let differs = a.len() != c.len()
            || a.iter().zip(&c).any(|(va, vc)| va.position != vc.position);
        assert!(differs);
    }

    #[test]
    fn test_city_has_ground_roads_and_buildings() {
        let verts = build_city(7);
        // Ground quad + 61 road segments minimum
        let ground_and_roads = 6 + 61 * 36;
        assert!(verts.len() > ground_and_roads);
        // Buildings rise above the road plane
        assert!(verts.iter().any(|v| v.position[1] > 40.0));
    }

    #[test]
    fn test_hsl_conversion() {
        // Pure red
        let (r, g, b) = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((r - 1.0).abs() < 1e-5 && g.abs() < 1e-5 && b.abs() < 1e-5);
        // Achromatic gray
        let (r, g, b) = hsl_to_rgb(0.3, 0.0, 0.25);
        assert!((r - 0.25).abs() < 1e-5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        // Blue-ish building hue stays dark
        let (r, g, b) = hsl_to_rgb(0.65, 0.5, 0.1);
        assert!(b > r && b > g);
        assert!(b < 0.2);
    }
}
