//! Tactical reasoning, leaves first.
//!
//! - [`sampler`] enumerates candidate points on circles
//! - [`threat`] predicts who can strike a point next tick
//! - [`combat`] projects fights over several ticks
//! - [`path`] picks the safest next step
//! - [`site`] searches build sites
//! - [`ledger`] tracks reserved mana within a turn
//! - [`mission`] picks, deconflicts and executes unit missions
//! - [`production`] decides what portals summon
pub mod combat;
pub mod ledger;
pub mod mission;
pub mod path;
pub mod production;
pub mod sampler;
pub mod site;
pub mod threat;

pub use combat::{Engagement, is_safe_to_hold, project_engagement, should_engage, will_finish};
pub use ledger::ResourceLedger;
pub use mission::{Assignment, Mission, MissionKind, assign, best_mission, execute};
pub use path::next_step;
pub use production::{ProductionSummary, portal_turn};
pub use sampler::{Ring, ring_points};
pub use site::{SiteCache, SitePlan, SiteSearch, best_build_site};
pub use threat::{Subject, ThreatModel};
