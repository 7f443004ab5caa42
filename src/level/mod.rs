//! Remote tank fill level: fetching, periodic polling and gauge display
//!
//! - `client`: one-shot HTTP fetch of the level payload
//! - `poller`: periodic fetch loop publishing [`LevelState`]
//! - `animation`: eased gauge width between successive readings
//! - `band`: colour and status label for a reading

pub mod animation;
pub mod band;
pub mod client;
pub mod poller;


pub use animation::{CubicBezier, LevelAnimation, ANIMATION_DURATION};
pub use band::{LevelBand, PENDING_COLOR};
pub use client::{parse_level, LevelClient};
pub use poller::{LevelPoller, LevelState, PollerHandle};
