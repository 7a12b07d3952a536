//! Schedule delay from qualitative risk indicators
//!
//! Each risk flag carries a fixed number of days. The delay factor is the
//! plain sum of the weights of the flags that are set, so it ranges from 0
//! (no risk) to 18 (every risk).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One qualitative risk indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    RainySeason,
    LackOfMaterial,
    LackOfLabor,
    LackOfSkill,
    LackOfTools,
    Rework,
}

impl RiskFactor {
    /// Delay in days contributed when the flag is set
    pub fn weight(&self) -> u32 {
        match self {
            RiskFactor::RainySeason => 4,
            RiskFactor::LackOfMaterial => 5,
            RiskFactor::LackOfLabor => 1,
            RiskFactor::LackOfSkill => 1,
            RiskFactor::LackOfTools => 5,
            RiskFactor::Rework => 2,
        }
    }

    pub fn all() -> &'static [RiskFactor] {
        &[
            RiskFactor::RainySeason,
            RiskFactor::LackOfMaterial,
            RiskFactor::LackOfLabor,
            RiskFactor::LackOfSkill,
            RiskFactor::LackOfTools,
            RiskFactor::Rework,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::RainySeason => "Rainy season",
            RiskFactor::LackOfMaterial => "Lack of material",
            RiskFactor::LackOfLabor => "Lack of labor",
            RiskFactor::LackOfSkill => "Lack of skill",
            RiskFactor::LackOfTools => "Lack of tools",
            RiskFactor::Rework => "Rework",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The six independent risk flags of a work item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskFactors {
    pub rainy_season: bool,
    pub lack_of_material: bool,
    pub lack_of_labor: bool,
    /// Older request files call this flag `lack_of_water`
    #[serde(alias = "lack_of_water")]
    pub lack_of_skill: bool,
    pub lack_of_tools: bool,
    pub rework: bool,
}

impl RiskFactors {
    /// Every flag set
    pub fn all_set() -> Self {
        Self {
            rainy_season: true,
            lack_of_material: true,
            lack_of_labor: true,
            lack_of_skill: true,
            lack_of_tools: true,
            rework: true,
        }
    }

    pub fn is_set(&self, factor: RiskFactor) -> bool {
        match factor {
            RiskFactor::RainySeason => self.rainy_season,
            RiskFactor::LackOfMaterial => self.lack_of_material,
            RiskFactor::LackOfLabor => self.lack_of_labor,
            RiskFactor::LackOfSkill => self.lack_of_skill,
            RiskFactor::LackOfTools => self.lack_of_tools,
            RiskFactor::Rework => self.rework,
        }
    }

    pub fn set(&mut self, factor: RiskFactor, value: bool) {
        let flag = match factor {
            RiskFactor::RainySeason => &mut self.rainy_season,
            RiskFactor::LackOfMaterial => &mut self.lack_of_material,
            RiskFactor::LackOfLabor => &mut self.lack_of_labor,
            RiskFactor::LackOfSkill => &mut self.lack_of_skill,
            RiskFactor::LackOfTools => &mut self.lack_of_tools,
            RiskFactor::Rework => &mut self.rework,
        };
        *flag = value;
    }

    /// Flags that are set, in declaration order
    pub fn active(&self) -> Vec<RiskFactor> {
        RiskFactor::all()
            .iter()
            .copied()
            .filter(|f| self.is_set(*f))
            .collect()
    }

    /// The delay factor: sum of weights of the set flags
    pub fn delay_days(&self) -> u32 {
        RiskFactor::all()
            .iter()
            .filter(|f| self.is_set(**f))
            .map(|f| f.weight())
            .sum()
    }
}

/// Maximum possible delay factor
pub fn max_delay_days() -> u32 {
    RiskFactor::all().iter().map(|f| f.weight()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_risk_no_delay() {
        assert_eq!(RiskFactors::default().delay_days(), 0);
    }

    #[test]
    fn test_all_risks_eighteen_days() {
        assert_eq!(RiskFactors::all_set().delay_days(), 18);
        assert_eq!(max_delay_days(), 18);
    }

    #[test]
    fn test_individual_weights() {
        let expected = [4, 5, 1, 1, 5, 2];
        for (factor, weight) in RiskFactor::all().iter().zip(expected) {
            let mut risks = RiskFactors::default();
            risks.set(*factor, true);
            assert_eq!(risks.delay_days(), weight, "{}", factor);
            assert_eq!(risks.active(), vec![*factor]);
        }
    }

    #[test]
    fn test_delay_monotone_as_flags_are_set() {
        let mut risks = RiskFactors::default();
        let mut previous = risks.delay_days();
        for factor in RiskFactor::all() {
            risks.set(*factor, true);
            let current = risks.delay_days();
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 18);
    }

    #[test]
    fn test_lack_of_water_alias() {
        let risks: RiskFactors = serde_yml::from_str("lack_of_water: true\nrainy_season: true").unwrap();
        assert!(risks.lack_of_skill);
        assert_eq!(risks.delay_days(), 5);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let parsed: Result<RiskFactors, _> = serde_yml::from_str("earthquake: true");
        assert!(parsed.is_err());
    }
}
