//! Runtime selection of a built-in operator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::aggregate::numeric::{Bounded, Integral, Summable};
use crate::aggregate::ops::{Gcd, Max, Min, Sum, Xor};
use crate::error::{ArboretumError, Result};

/// Names one of the built-in operators so it can be chosen from
/// configuration instead of at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Sum,
    Min,
    Max,
    Gcd,
    Xor,
}

impl AggregateKind {
    /// All built-in kinds.
    pub const ALL: [AggregateKind; 5] = [
        AggregateKind::Sum,
        AggregateKind::Min,
        AggregateKind::Max,
        AggregateKind::Gcd,
        AggregateKind::Xor,
    ];

    /// The lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateKind::Sum => "sum",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
            AggregateKind::Gcd => "gcd",
            AggregateKind::Xor => "xor",
        }
    }

    /// Whether this kind can back a Fenwick tree.
    pub fn is_invertible(self) -> bool {
        matches!(self, AggregateKind::Sum | AggregateKind::Xor)
    }

    /// Instantiate the operator for integer type `T`.
    pub fn operator<T>(self) -> Box<dyn Aggregate<T>>
    where
        T: Summable + Bounded + Integral + 'static,
    {
        match self {
            AggregateKind::Sum => Box::new(Sum),
            AggregateKind::Min => Box::new(Min),
            AggregateKind::Max => Box::new(Max),
            AggregateKind::Gcd => Box::new(Gcd),
            AggregateKind::Xor => Box::new(Xor),
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateKind {
    type Err = ArboretumError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        AggregateKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ArboretumError::invalid_argument(format!("unknown aggregate '{s}'")))
    }
}
