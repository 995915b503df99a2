//! Risk profiles and the return-rate rule they imply

use serde::{Deserialize, Serialize};

/// Investor risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

/// Nominal asset mix for a risk profile, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetMix {
    pub equity_percent: f64,
    pub debt_percent: f64,
    pub gold_percent: f64,
}

impl RiskProfile {
    /// Expected long-run annual return in percent
    pub fn expected_return_percent(&self) -> f64 {
        match self {
            RiskProfile::Conservative => 8.0,
            RiskProfile::Moderate => 10.0,
            RiskProfile::Aggressive => 12.0,
        }
    }

    pub fn asset_mix(&self) -> AssetMix {
        match self {
            RiskProfile::Conservative => AssetMix {
                equity_percent: 30.0,
                debt_percent: 60.0,
                gold_percent: 10.0,
            },
            RiskProfile::Moderate => AssetMix {
                equity_percent: 50.0,
                debt_percent: 40.0,
                gold_percent: 10.0,
            },
            RiskProfile::Aggressive => AssetMix {
                equity_percent: 70.0,
                debt_percent: 20.0,
                gold_percent: 10.0,
            },
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(RiskProfile::Conservative),
            "moderate" => Some(RiskProfile::Moderate),
            "aggressive" => Some(RiskProfile::Aggressive),
            _ => None,
        }
    }
}

/// Source of the annual growth rate used by a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateRule {
    /// Explicit annual rate in percent
    Fixed(f64),
    /// Rate implied by a risk profile
    Profile(RiskProfile),
}

impl RateRule {
    pub fn annual_rate_percent(&self) -> f64 {
        match self {
            RateRule::Fixed(rate) => *rate,
            RateRule::Profile(profile) => profile.expected_return_percent(),
        }
    }
}
