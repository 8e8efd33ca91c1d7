//! Easing curves for the animation engines.
//!
//! Counters always use [`ease_out_quart`]; the reveal engine accepts a named
//! curve per element, parsed leniently (unknown names fall back to the
//! default rather than failing the animation).

use std::str::FromStr;
use strum::{Display, EnumString};

/// Quartic ease-out: fast initial motion, gentle settle.
///
/// `t` is expected in `[0, 1]`; the output is in `[0, 1]` and monotonically
/// non-decreasing over that range.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Named easing curves recognized by the reveal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Easing {
    #[strum(serialize = "linear")]
    Linear,
    #[strum(serialize = "power1.out")]
    Power1Out,
    #[strum(serialize = "power2.out")]
    Power2Out,
    #[strum(serialize = "power3.out")]
    Power3Out,
    #[strum(serialize = "power4.out")]
    Power4Out,
}

impl Default for Easing {
    fn default() -> Self {
        Self::Power2Out
    }
}

impl Easing {
    /// Apply the curve to a progress value in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power4Out => 1.0 - (1.0 - t).powi(5),
        }
    }

    /// Parse an easing name, falling back to the default for unknown input.
    pub fn parse_or_default(name: &str) -> Self {
        Self::from_str(name.trim()).unwrap_or_default()
    }
}
