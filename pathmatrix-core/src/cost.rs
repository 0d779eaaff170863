//! Path cost algebra.
//!
//! A cost is either a finite sum of edge weights or `Unreachable`.
//! `Unreachable` is the neutral absorbing value of the relaxation:
//! it never takes part in arithmetic, and anything combined with it is unreachable too.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cost of a path between two nodes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cost {
    /// Sum of the edge weights along a known path.
    Finite(f64),

    /// No path is known.
    Unreachable,
}

impl Cost {
    /// Whether a path is known.
    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    /// Numeric value, if a path is known.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Cost::Finite(w) => Some(w),
            Cost::Unreachable => None,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::Unreachable
    }
}

impl From<Option<f64>> for Cost {
    fn from(w: Option<f64>) -> Self {
        w.map_or(Cost::Unreachable, Cost::Finite)
    }
}

/// Joins two path segments. Defined only when both are known,
/// so `Unreachable` never leaks into arithmetic as a number.
/// A sum too large for `f64` saturates at `f64::MAX`, keeping a `Finite` cost finite.
impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite((a + b).min(f64::MAX).max(f64::MIN)),
            _ => Cost::Unreachable,
        }
    }
}

// Serialized as a plain number, or `null` when unreachable.
impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(Cost::from)
    }
}

/// Which optimum the path search looks for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Minimum-cost path. Unreachable reads as `+∞`.
    #[serde(alias = "min")]
    Minimize,

    /// Maximum-cost path. Unreachable reads as `-∞`.
    #[serde(alias = "max")]
    Maximize,
}

impl Mode {
    /// Whether `candidate` is strictly better than `current`.
    /// Ties never count as an improvement.
    pub fn improves(self, candidate: Cost, current: Cost) -> bool {
        match (candidate, current) {
            (Cost::Unreachable, _) => false,
            (Cost::Finite(_), Cost::Unreachable) => true,
            (Cost::Finite(c), Cost::Finite(cur)) => match self {
                Mode::Minimize => c < cur,
                Mode::Maximize => c > cur,
            },
        }
    }

    /// Display string for the unreachable cost in this mode.
    pub fn unreachable_str(self) -> &'static str {
        match self {
            Mode::Minimize => "+∞",
            Mode::Maximize => "-∞",
        }
    }

    /// Formats a cost for display in this mode.
    pub fn format(self, cost: Cost) -> String {
        match cost {
            Cost::Finite(w) => w.to_string(),
            Cost::Unreachable => self.unreachable_str().to_string(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Minimize => write!(f, "minimize"),
            Mode::Maximize => write!(f, "maximize"),
        }
    }
}
