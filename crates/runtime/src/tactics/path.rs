//! Greedy single-step movement.
//!
//! The map is open ground, so there is no path search: each turn a unit picks
//! the best point on its movement ring and the choice is re-made next turn
//! from a fresh snapshot.

use game_core::{EntityId, GameObject, Location, MapBounds};

use super::sampler::ring_points;
use super::threat::ThreatModel;

/// Best next location for `unit` heading to `destination`.
///
/// Candidates are the sampled ring at the unit's max speed, plus the
/// destination itself when it is within one move. The winner has the fewest
/// possible attackers (enemies assumed to chase the unit), then the shortest
/// distance left to the destination. Falls back to standing still when the
/// unit cannot move.
pub fn next_step(
    threats: &ThreatModel<'_>,
    bounds: MapBounds,
    unit: &GameObject,
    destination: Location,
    exceptions: &[EntityId],
) -> Location {
    let speed = unit.max_speed();
    if speed <= 0 {
        return unit.location;
    }

    let mut candidates = ring_points(unit.location, speed, bounds);
    if unit.location.in_range(destination, speed) {
        candidates.insert(destination);
    }

    let step = candidates
        .into_iter()
        .min_by_key(|candidate| {
            let exposure = threats
                .possible_attackers(*candidate, Some(unit.location), exceptions)
                .len();
            (exposure, candidate.distance(destination))
        })
        .unwrap_or(unit.location);

    tracing::trace!(unit = %unit.id, from = %unit.location, to = %step, "Next step");
    step
}
