use serde::{Deserialize, Serialize};
use std::fmt;

/// Ngưỡng bắt đầu mức Warning (bao gồm)
pub const WARNING_THRESHOLD: f64 = 1000.0;
/// Ngưỡng bắt đầu mức Danger (bao gồm)
pub const DANGER_THRESHOLD: f64 = 5000.0;

/// Mức rủi ro suy ra từ điểm rủi ro của RugCheck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Good,
    Warning,
    Danger,
}

impl RiskTier {
    /// Phân loại điểm rủi ro. Cận dưới bao gồm, cận trên không bao gồm; NaN rơi vào Danger.
    pub fn from_score(score: f64) -> Self {
        if score < WARNING_THRESHOLD {
            RiskTier::Good
        } else if score < DANGER_THRESHOLD {
            RiskTier::Warning
        } else {
            RiskTier::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Good => "Good",
            RiskTier::Warning => "Warning",
            RiskTier::Danger => "Danger",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify_risk(score: f64) -> RiskTier {
    RiskTier::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify_risk(999.0), RiskTier::Good);
        assert_eq!(classify_risk(1000.0), RiskTier::Warning);
        assert_eq!(classify_risk(4999.0), RiskTier::Warning);
        assert_eq!(classify_risk(5000.0), RiskTier::Danger);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify_risk(0.0), RiskTier::Good);
        assert_eq!(classify_risk(-1.0), RiskTier::Good);
        assert_eq!(classify_risk(999.999), RiskTier::Good);
        assert_eq!(classify_risk(f64::MAX), RiskTier::Danger);
        assert_eq!(classify_risk(f64::NAN), RiskTier::Danger);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&RiskTier::Good).unwrap(), "\"Good\"");
        assert_eq!(serde_json::to_string(&RiskTier::Danger).unwrap(), "\"Danger\"");
        assert_eq!(RiskTier::Warning.to_string(), "Warning");
    }

    proptest! {
        #[test]
        fn prop_tier_matches_thresholds(score in -1.0e7f64..1.0e7) {
            let expected = if score < 1000.0 {
                RiskTier::Good
            } else if score < 5000.0 {
                RiskTier::Warning
            } else {
                RiskTier::Danger
            };
            prop_assert_eq!(classify_risk(score), expected);
        }

        #[test]
        fn prop_tier_is_monotonic(a in 0.0f64..1.0e5, b in 0.0f64..1.0e5) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!((classify_risk(low) as u8) <= (classify_risk(high) as u8));
        }
    }
}
