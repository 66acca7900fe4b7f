//! Integer sampling of circle perimeters.

use std::collections::BTreeSet;

use game_core::{Location, MapBounds};

/// Sampled perimeter of a circle.
///
/// For every column offset `i` in `0..=radius` the two row solutions of the
/// circle equation are taken, each rounded down, on both sides of the center
/// column, so each offset yields at most four points. This under-samples steep arcs but
/// stays linear in the radius; callers search many concentric rings, so
/// exhaustiveness is not needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
    pub center: Location,
    pub radius: i32,
}

impl Ring {
    pub const fn new(center: Location, radius: i32) -> Self {
        Self { center, radius }
    }

    /// All sampled points, without clipping.
    ///
    /// A zero radius yields the center; a negative radius yields nothing.
    pub fn points(&self) -> BTreeSet<Location> {
        let mut points = BTreeSet::new();
        if self.radius < 0 {
            return points;
        }

        let r = i64::from(self.radius);
        let Location { row, col } = self.center;
        for i in 0..=r {
            let s = ((r * r - i * i) as f64).sqrt();
            let upper = (f64::from(row) + s).floor() as i32;
            let lower = (f64::from(row) - s).floor() as i32;
            let i = i as i32;

            for row in [upper, lower] {
                points.insert(Location::new(row, col + i));
                points.insert(Location::new(row, col - i));
            }
        }
        points
    }

    /// Sampled points that lie inside `bounds`.
    pub fn points_within(&self, bounds: MapBounds) -> BTreeSet<Location> {
        let mut points = self.points();
        points.retain(|location| bounds.contains(*location));
        points
    }
}

/// Convenience wrapper: sampled ring around `center`, clipped to `bounds`.
pub fn ring_points(center: Location, radius: i32, bounds: MapBounds) -> BTreeSet<Location> {
    Ring::new(center, radius).points_within(bounds)
}
