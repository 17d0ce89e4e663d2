//! Variant selector: picks a sector's default or alternate job-title track.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Which whitelist/vector table a sector uses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Alternate,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Alternate => "alternate",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Variant::Default),
            "alternate" => Ok(Variant::Alternate),
            other => Err(format!("unknown variant '{other}'")),
        }
    }
}

/// One entry of the upstream sector classification, ordered best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorScore {
    pub sector: String,
    pub score: f64,
}

impl SectorScore {
    pub fn new(sector: impl Into<String>, score: f64) -> Self {
        Self {
            sector: sector.into(),
            score,
        }
    }
}

/// Per sector-pair tuning for switching to the alternate track.
///
/// The alternate track is taken when the competing sector sits in the top two
/// and either the gap is within `strict_gap`, or the gap is within `wide_gap`
/// and the competitor scores at least `wide_gap_min_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRule {
    pub alternate_sector: String,
    pub strict_gap: f64,
    pub wide_gap: f64,
    pub wide_gap_min_score: f64,
}

impl VariantRule {
    pub fn new(alternate_sector: impl Into<String>) -> Self {
        Self {
            alternate_sector: alternate_sector.into(),
            strict_gap: 0.5,
            wide_gap: 1.2,
            wide_gap_min_score: 36.0,
        }
    }
}

pub fn select_variant(chosen: &str, rule: Option<&VariantRule>, ranked: &[SectorScore]) -> Variant {
    let Some(rule) = rule else {
        return Variant::Default;
    };
    if ranked.len() < 2 {
        return Variant::Default;
    }

    let Some(alternate) = ranked[..2]
        .iter()
        .find(|s| s.sector == rule.alternate_sector)
    else {
        return Variant::Default;
    };
    let Some(chosen_score) = ranked.iter().find(|s| s.sector == chosen).map(|s| s.score) else {
        return Variant::Default;
    };

    let gap = (chosen_score - alternate.score).abs();
    let strict = gap <= rule.strict_gap;
    let wide = gap <= rule.wide_gap && alternate.score >= rule.wide_gap_min_score;

    let variant = if strict || wide {
        Variant::Alternate
    } else {
        Variant::Default
    };

    info!(
        sector = chosen,
        alternate_sector = %rule.alternate_sector,
        gap,
        alternate_score = alternate.score,
        variant = %variant,
        "variant selected"
    );

    variant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> VariantRule {
        VariantRule::new("defense")
    }

    #[test]
    fn test_strict_gap_selects_alternate() {
        let ranked = [SectorScore::new("droit", 35.0), SectorScore::new("defense", 34.6)];
        assert_eq!(select_variant("droit", Some(&rule()), &ranked), Variant::Alternate);
    }

    #[test]
    fn test_wide_gap_with_weak_alternate_stays_default() {
        let ranked = [SectorScore::new("droit", 35.6), SectorScore::new("defense", 35.0)];
        assert_eq!(select_variant("droit", Some(&rule()), &ranked), Variant::Default);
    }

    #[test]
    fn test_wide_gap_with_strong_alternate_selects_alternate() {
        let ranked = [SectorScore::new("droit", 38.1), SectorScore::new("defense", 37.0)];
        assert_eq!(select_variant("droit", Some(&rule()), &ranked), Variant::Alternate);
    }

    #[test]
    fn test_gap_beyond_wide_threshold_stays_default() {
        let ranked = [SectorScore::new("droit", 40.0), SectorScore::new("defense", 38.0)];
        assert_eq!(select_variant("droit", Some(&rule()), &ranked), Variant::Default);
    }

    #[test]
    fn test_alternate_outside_top_two_stays_default() {
        let ranked = [
            SectorScore::new("droit", 35.0),
            SectorScore::new("sante", 34.9),
            SectorScore::new("defense", 34.8),
        ];
        assert_eq!(select_variant("droit", Some(&rule()), &ranked), Variant::Default);
    }

    #[test]
    fn test_short_input_stays_default() {
        let ranked = [SectorScore::new("droit", 35.0)];
        assert_eq!(select_variant("droit", Some(&rule()), &ranked), Variant::Default);
        assert_eq!(select_variant("droit", Some(&rule()), &[]), Variant::Default);
    }

    #[test]
    fn test_sector_without_rule_stays_default() {
        let ranked = [SectorScore::new("sante", 35.0), SectorScore::new("defense", 34.9)];
        assert_eq!(select_variant("sante", None, &ranked), Variant::Default);
    }

    #[test]
    fn test_variant_parse_and_serde() {
        assert_eq!("Alternate".parse::<Variant>(), Ok(Variant::Alternate));
        assert!("other".parse::<Variant>().is_err());
        assert_eq!(serde_json::to_string(&Variant::Default).unwrap(), "\"default\"");
    }
}
