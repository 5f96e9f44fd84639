// LeadDesk - core/targets.rs
//
// Target progress: percentage, tier, and overall average.

use crate::core::model::Target;
use crate::util::constants::{TARGET_ACHIEVED_PERCENT, TARGET_ON_TRACK_PERCENT};

/// Progress band for a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTier {
    Achieved,
    OnTrack,
    Behind,
}

impl TargetTier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= TARGET_ACHIEVED_PERCENT {
            TargetTier::Achieved
        } else if percentage >= TARGET_ON_TRACK_PERCENT {
            TargetTier::OnTrack
        } else {
            TargetTier::Behind
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetTier::Achieved => "Achieved",
            TargetTier::OnTrack => "On track",
            TargetTier::Behind => "Behind",
        }
    }
}

/// round(current / target * 100), 0 when the target is 0. May exceed 100.
pub fn percentage(target: &Target) -> u32 {
    if target.target == 0 {
        return 0;
    }
    (target.current as f64 / target.target as f64 * 100.0).round() as u32
}

pub fn tier(target: &Target) -> TargetTier {
    TargetTier::from_percentage(percentage(target))
}

/// Mean of per-target percentages, each capped at 100. 0 with no targets.
pub fn overall_progress(targets: &[Target]) -> u32 {
    if targets.is_empty() {
        return 0;
    }
    let sum: u64 = targets
        .iter()
        .map(|t| u64::from(percentage(t).min(100)))
        .sum();
    (sum as f64 / targets.len() as f64).round() as u32
}

/// Whether a target counts money rather than items.
pub fn is_currency(target: &Target) -> bool {
    target.unit.eq_ignore_ascii_case("BDT")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TargetPeriod;

    fn make_target(current: u64, target: u64) -> Target {
        Target {
            id: "t".to_string(),
            name: "Admissions".to_string(),
            current,
            target,
            unit: "students".to_string(),
            period: TargetPeriod::Monthly,
            trend: Some(12),
        }
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(&make_target(18, 25)), 72);
        assert_eq!(percentage(&make_target(2, 3)), 67);
        assert_eq!(percentage(&make_target(5, 0)), 0);
        assert_eq!(percentage(&make_target(30, 20)), 150);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(tier(&make_target(25, 25)), TargetTier::Achieved);
        assert_eq!(tier(&make_target(7, 10)), TargetTier::OnTrack);
        assert_eq!(tier(&make_target(69, 100)), TargetTier::Behind);
    }

    #[test]
    fn test_overall_caps_each_target() {
        let targets = vec![make_target(30, 20), make_target(1, 2)];
        // min(150, 100) = 100 and 50, mean 75.
        assert_eq!(overall_progress(&targets), 75);
        assert_eq!(overall_progress(&[]), 0);
    }

    #[test]
    fn test_currency_unit() {
        let mut t = make_target(1, 1);
        assert!(!is_currency(&t));
        t.unit = "BDT".to_string();
        assert!(is_currency(&t));
    }
}
