//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - Clamped delta time only
//! - No randomness (levels arrive fully generated)
//! - Stable iteration order (input order of entity lists)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod state;
pub mod tick;

pub use body::{Body, Contacts, is_out_of_bounds};
pub use collision::{Aabb, Penetration, ResolveAxis, circle_intersects_aabb};
pub use enemy::{EnemyBody, MoveType};
pub use player::PlayerBody;
pub use state::{Collectible, GroundGap, Platform, PlatformTier};
pub use tick::{Action, FrameClock, InputState, KeyCode, StepReport, World, clamp_frame_dt};
