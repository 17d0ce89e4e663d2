//! Context blender: folds optional sector-context tags into the profile vector.

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AxisVector, AXIS_COUNT};
use crate::questions::AxisDelta;

pub const PRIMARY_WEIGHT: f64 = 0.75;
pub const CONTEXT_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveStyle {
    Analytical,
    Creative,
    Practical,
    Relational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantGoal {
    Security,
    Impact,
    Autonomy,
    Expertise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainContext {
    Field,
    Office,
    Digital,
    Public,
}

impl CognitiveStyle {
    fn boosts(self) -> &'static [AxisDelta] {
        match self {
            CognitiveStyle::Analytical => &[(Axis::Analysis, 3), (Axis::Structure, 1)],
            CognitiveStyle::Creative => &[(Axis::Creativity, 3), (Axis::RiskTolerance, 1)],
            CognitiveStyle::Practical => &[(Axis::Action, 3), (Axis::Structure, 1)],
            CognitiveStyle::Relational => &[(Axis::HumanContact, 3), (Axis::Leadership, 1)],
        }
    }
}

impl DominantGoal {
    fn boosts(self) -> &'static [AxisDelta] {
        match self {
            DominantGoal::Security => &[(Axis::Stability, 3)],
            DominantGoal::Impact => &[(Axis::Leadership, 2), (Axis::HumanContact, 1)],
            DominantGoal::Autonomy => &[(Axis::RiskTolerance, 2), (Axis::Creativity, 1)],
            DominantGoal::Expertise => &[(Axis::Analysis, 2), (Axis::Structure, 1)],
        }
    }
}

impl DomainContext {
    fn boosts(self) -> &'static [AxisDelta] {
        match self {
            DomainContext::Field => &[(Axis::Action, 2)],
            DomainContext::Office => &[(Axis::Structure, 2), (Axis::Stability, 1)],
            DomainContext::Digital => &[(Axis::Analysis, 1), (Axis::Creativity, 1)],
            DomainContext::Public => &[(Axis::HumanContact, 2)],
        }
    }
}

/// Categorical context tags; every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorContext {
    #[serde(default)]
    pub cognitive_style: Option<CognitiveStyle>,
    #[serde(default)]
    pub dominant_goal: Option<DominantGoal>,
    #[serde(default)]
    pub domain_context: Option<DomainContext>,
}

impl SectorContext {
    pub fn is_empty(&self) -> bool {
        self.cognitive_style.is_none()
            && self.dominant_goal.is_none()
            && self.domain_context.is_none()
    }

    /// Sums the fixed boosts of every present tag. No tags → zero vector.
    pub fn to_vector(&self) -> AxisVector {
        let boosts = [
            self.cognitive_style.map(CognitiveStyle::boosts),
            self.dominant_goal.map(DominantGoal::boosts),
            self.domain_context.map(DomainContext::boosts),
        ];

        let mut values = [0.0; AXIS_COUNT];
        for &(axis, amount) in boosts.iter().flatten().flat_map(|deltas| deltas.iter()) {
            values[axis.index()] += f64::from(amount);
        }
        AxisVector::clamped(values)
    }
}

/// Weighted sum of the primary and context vectors, clamped again.
/// A zero context vector leaves the primary unchanged.
pub fn blend(primary: &AxisVector, context: &AxisVector) -> AxisVector {
    if context.is_zero() {
        return AxisVector::clamped(*primary.values());
    }

    let mut values = [0.0; AXIS_COUNT];
    for axis in Axis::ALL {
        values[axis.index()] = PRIMARY_WEIGHT * primary[axis] + CONTEXT_WEIGHT * context[axis];
    }
    AxisVector::clamped(values)
}

/// Applies `context` when present and non-empty.
pub fn apply_context(primary: &AxisVector, context: Option<&SectorContext>) -> AxisVector {
    match context {
        Some(ctx) if !ctx.is_empty() => blend(primary, &ctx.to_vector()),
        _ => *primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> AxisVector {
        AxisVector::clamped([4.0, 6.0, 2.0, 8.0, 5.0, 1.0, 7.0, 3.0])
    }

    #[test]
    fn test_empty_context_is_zero_vector() {
        assert!(SectorContext::default().to_vector().is_zero());
    }

    #[test]
    fn test_blend_with_zero_is_noop() {
        let p = primary();
        assert_eq!(blend(&p, &AxisVector::ZERO), p);
        assert_eq!(apply_context(&p, None), p);
        assert_eq!(apply_context(&p, Some(&SectorContext::default())), p);
    }

    #[test]
    fn test_context_vector_sums_tag_boosts() {
        let ctx = SectorContext {
            cognitive_style: Some(CognitiveStyle::Analytical),
            dominant_goal: Some(DominantGoal::Expertise),
            domain_context: Some(DomainContext::Office),
        };
        let v = ctx.to_vector();
        assert_eq!(v.get(Axis::Analysis), 5.0);
        assert_eq!(v.get(Axis::Structure), 4.0);
        assert_eq!(v.get(Axis::Stability), 1.0);
        assert_eq!(v.get(Axis::Creativity), 0.0);
    }

    #[test]
    fn test_blend_is_weighted_sum() {
        let p = primary();
        let ctx = SectorContext {
            dominant_goal: Some(DominantGoal::Security),
            ..Default::default()
        };
        let blended = blend(&p, &ctx.to_vector());
        // STABILITY: 0.75 * 7 + 0.25 * 3 = 6.0
        assert_eq!(blended.get(Axis::Stability), 6.0);
        // CREATIVITY: 0.75 * 6 + 0.25 * 0 = 4.5
        assert_eq!(blended.get(Axis::Creativity), 4.5);
    }

    #[test]
    fn test_context_tags_deserialize_snake_case() {
        let ctx: SectorContext =
            serde_json::from_str(r#"{"cognitive_style":"relational","domain_context":"field"}"#)
                .unwrap();
        assert_eq!(ctx.cognitive_style, Some(CognitiveStyle::Relational));
        assert_eq!(ctx.dominant_goal, None);
        assert_eq!(ctx.domain_context, Some(DomainContext::Field));
    }
}
