//! Animation engines.
//!
//! Three independent engines, all advanced by the application's per-frame
//! driver and all instance-owned (no module-level state):
//! - `counter` - scroll-triggered numeric counters
//! - `reveal` - scroll-position opacity/translate reveals
//! - `entrance` - the staggered header entrance timeline
//!
//! The engines share the page geometry they test against but none of each
//! other's state.

pub mod counter;
pub mod easing;
pub mod entrance;
pub mod reveal;

pub use counter::{CounterAnimator, CounterConfig};
pub use easing::{ease_out_quart, Easing};
pub use entrance::{EntranceConfig, EntranceSequencer, ItemStyle};
pub use reveal::{RevealAnimator, RevealDefaults, RevealStyle};
