//! Layout engine for placing cards on the page
//!
//! Fixed cards stay where the page author put them and only act as
//! obstacles; random cards are scattered by rejection sampling so that no
//! single obstacle covers too much of them.

pub mod config;
pub mod engine;
pub mod random;
pub mod types;

pub use config::LayoutConfig;
pub use engine::{obstacle_order, LayoutEngine, ReservedBands, UsableArea};
pub use random::{FixedRandom, RandomSource, RngSource, SequenceRandom};
pub use types::*;
