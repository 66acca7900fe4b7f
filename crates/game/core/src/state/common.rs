use std::fmt;

/// Unique identifier for any object tracked in a world snapshot.
///
/// Identifiers are assigned by the external simulation and stay stable for
/// the lifetime of the object, so they can key cross-turn memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which player controls an object.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// Controlled by this bot.
    Mine,
    /// Controlled by the opponent.
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Mine => Side::Enemy,
            Side::Enemy => Side::Mine,
        }
    }
}

/// Discrete map position expressed as `(row, col)`.
///
/// Distances are Euclidean and rounded to the nearest integer, matching the
/// precision the simulation reports. All projections return new values; a
/// location is never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Exact (unrounded) Euclidean distance.
    pub fn exact_distance(self, other: Location) -> f64 {
        let dr = (other.row as i64 - self.row as i64) as f64;
        let dc = (other.col as i64 - self.col as i64) as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Euclidean distance rounded to the nearest integer.
    pub fn distance(self, other: Location) -> i32 {
        self.exact_distance(other).round() as i32
    }

    /// Returns true if `other` is at most `range` away.
    pub fn in_range(self, other: Location, range: i32) -> bool {
        self.distance(other) <= range
    }

    /// Moves up to `step` units toward `target`.
    ///
    /// Returns `target` itself when it is within `step`, and `self` when
    /// `step` is not positive.
    pub fn towards(self, target: Location, step: i32) -> Location {
        if step <= 0 || self == target {
            return self;
        }

        let distance = self.exact_distance(target);
        if f64::from(step) >= distance {
            return target;
        }

        let ratio = f64::from(step) / distance;
        self.offset_by(target, ratio)
    }

    /// Moves `step` units directly away from `target`.
    ///
    /// When both points coincide there is no direction to flee along and
    /// `self` is returned.
    pub fn away_from(self, target: Location, step: i32) -> Location {
        if step <= 0 || self == target {
            return self;
        }

        let ratio = -f64::from(step) / self.exact_distance(target);
        self.offset_by(target, ratio)
    }

    fn offset_by(self, target: Location, ratio: f64) -> Location {
        let dr = f64::from(target.row - self.row) * ratio;
        let dc = f64::from(target.col - self.col) * ratio;
        Location::new(self.row + dr.round() as i32, self.col + dc.round() as i32)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular map extent; valid rows are `0..rows`, valid cols `0..cols`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBounds {
    pub rows: i32,
    pub cols: i32,
}

impl MapBounds {
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, location: Location) -> bool {
        location.row >= 0 && location.col >= 0 && location.row < self.rows && location.col < self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_rounds_to_nearest() {
        let a = Location::new(0, 0);
        assert_eq!(a.distance(Location::new(3, 4)), 5);
        assert_eq!(a.distance(Location::new(1, 1)), 1); // 1.414
        assert_eq!(a.distance(Location::new(1, 2)), 2); // 2.236
    }

    #[test]
    fn towards_clamps_at_target() {
        let a = Location::new(0, 0);
        let b = Location::new(0, 10);
        assert_eq!(a.towards(b, 4), Location::new(0, 4));
        assert_eq!(a.towards(b, 10), b);
        assert_eq!(a.towards(b, 25), b);
        assert_eq!(a.towards(b, 0), a);
    }

    #[test]
    fn towards_diagonal_keeps_direction() {
        let a = Location::new(0, 0);
        let b = Location::new(300, 400);
        assert_eq!(a.towards(b, 100), Location::new(60, 80));
    }

    #[test]
    fn away_from_moves_opposite() {
        let a = Location::new(10, 10);
        let b = Location::new(10, 20);
        assert_eq!(a.away_from(b, 5), Location::new(10, 5));
        assert_eq!(a.away_from(a, 5), a);
    }

    #[test]
    fn bounds_are_half_open() {
        let bounds = MapBounds::new(10, 20);
        assert!(bounds.contains(Location::new(0, 0)));
        assert!(bounds.contains(Location::new(9, 19)));
        assert!(!bounds.contains(Location::new(10, 0)));
        assert!(!bounds.contains(Location::new(0, -1)));
    }
}
