//! Axis model: the 8-dimensional scoring space shared by user profiles and job vectors.
//!
//! Every `AxisVector` that leaves this crate is complete (all 8 axes) and clamped to
//! `[AXIS_MIN, AXIS_MAX]`. Partial accumulators live only inside the builders.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AXIS_COUNT: usize = 8;
pub const AXIS_MIN: f64 = 0.0;
pub const AXIS_MAX: f64 = 10.0;

/// One named scoring dimension. Declaration order is the fixed axis order used
/// for storage, hashing and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Axis {
    Structure,
    Creativity,
    Action,
    HumanContact,
    Analysis,
    RiskTolerance,
    Stability,
    Leadership,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Structure,
        Axis::Creativity,
        Axis::Action,
        Axis::HumanContact,
        Axis::Analysis,
        Axis::RiskTolerance,
        Axis::Stability,
        Axis::Leadership,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Structure => "STRUCTURE",
            Axis::Creativity => "CREATIVITY",
            Axis::Action => "ACTION",
            Axis::HumanContact => "HUMAN_CONTACT",
            Axis::Analysis => "ANALYSIS",
            Axis::RiskTolerance => "RISK_TOLERANCE",
            Axis::Stability => "STABILITY",
            Axis::Leadership => "LEADERSHIP",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    #[error("Missing axis: {0}")]
    MissingAxis(Axis),

    #[error("Axis {axis} has value {value}, expected a number in [0, 10]")]
    OutOfRange { axis: Axis, value: f64 },

    #[error("Axis {0} is not a finite number")]
    NotFinite(Axis),
}

/// A complete 8-axis vector with every value in `[0, 10]`.
///
/// Serializes as an axis-name → value map. Deserialization goes through
/// [`AxisVector::new`], so a request carrying a partial or out-of-range vector is
/// rejected instead of coerced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Axis, f64>", into = "BTreeMap<Axis, f64>")]
pub struct AxisVector([f64; AXIS_COUNT]);

impl AxisVector {
    pub const ZERO: AxisVector = AxisVector([0.0; AXIS_COUNT]);

    /// Validates raw values without altering them.
    pub fn new(values: [f64; AXIS_COUNT]) -> Result<Self, VectorError> {
        for axis in Axis::ALL {
            let value = values[axis.index()];
            if !value.is_finite() {
                return Err(VectorError::NotFinite(axis));
            }
            if !(AXIS_MIN..=AXIS_MAX).contains(&value) {
                return Err(VectorError::OutOfRange { axis, value });
            }
        }
        Ok(Self(values))
    }

    /// Standard normalization: clamp to `[0, 10]` and round to two decimals.
    /// Non-finite inputs collapse to 0.
    pub fn clamped(values: [f64; AXIS_COUNT]) -> Self {
        Self(values.map(|v| round2(clamp_axis(v))))
    }

    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    pub fn values(&self) -> &[f64; AXIS_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.iter().map(move |&axis| (axis, self.0[axis.index()]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Cosine similarity in `[0, 1]`; 0 when either side is the zero vector.
    pub fn cosine_similarity(&self, other: &AxisVector) -> f64 {
        cosine_similarity(&self.0, &other.0).clamp(0.0, 1.0)
    }

    /// Fixed-order, fixed-precision rendering used as seed material.
    pub fn seed_material(&self) -> String {
        self.0
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for AxisVector {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Index<Axis> for AxisVector {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.index()]
    }
}

impl TryFrom<BTreeMap<Axis, f64>> for AxisVector {
    type Error = VectorError;

    fn try_from(map: BTreeMap<Axis, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; AXIS_COUNT];
        for axis in Axis::ALL {
            values[axis.index()] = *map.get(&axis).ok_or(VectorError::MissingAxis(axis))?;
        }
        Self::new(values)
    }
}

impl From<AxisVector> for BTreeMap<Axis, f64> {
    fn from(vector: AxisVector) -> Self {
        vector.iter().collect()
    }
}

/// Dot product over the magnitudes' product. Zero-magnitude inputs yield 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a < 1e-10 || norm_b < 1e-10 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

pub fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        return AXIS_MIN;
    }
    value.clamp(AXIS_MIN, AXIS_MAX)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
