// ********* Errors ***********

use snafu::Snafu;
use std::fmt::Display;
use std::str::FromStr;

/// Errors that prevent a procedure from completing.
///
/// Missing elements in a partial preorder are not errors: they are reported
/// as [`crate::Position::Absent`] by the position queries.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RankingError {
    #[snafu(display("invalid argument: {message}"))]
    InvalidArgument { message: String },
    #[snafu(display("unknown order lifting rule: {name}"))]
    UnknownLiftingRule { name: String },
    #[snafu(display("unknown social ranking rule: {name}"))]
    UnknownRankingRule { name: String },
}

pub type RankingResult<T> = Result<T, RankingError>;

// ********* Rules **********

/// The procedures that extend an order over individuals to an order over coalitions.
///
/// The numeric identifiers are the ones used by the experiment driver.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum LiftingRule {
    Minmax,
    Maxmin,
    Leximin,
    Leximax,
    Borda,
    IndirectUtility,
    Cardinality,
    IndirectUtilityThenCardinality,
    CardinalityThenIndirectUtility,
}

impl LiftingRule {
    pub const ALL: [LiftingRule; 9] = [
        LiftingRule::Minmax,
        LiftingRule::Maxmin,
        LiftingRule::Leximin,
        LiftingRule::Leximax,
        LiftingRule::Borda,
        LiftingRule::IndirectUtility,
        LiftingRule::Cardinality,
        LiftingRule::IndirectUtilityThenCardinality,
        LiftingRule::CardinalityThenIndirectUtility,
    ];

    pub fn id(&self) -> u32 {
        match self {
            LiftingRule::Minmax => 1,
            LiftingRule::Maxmin => 2,
            LiftingRule::Leximin => 3,
            LiftingRule::Leximax => 4,
            LiftingRule::Borda => 5,
            LiftingRule::IndirectUtility => 6,
            LiftingRule::Cardinality => 7,
            LiftingRule::IndirectUtilityThenCardinality => 8,
            LiftingRule::CardinalityThenIndirectUtility => 9,
        }
    }

    pub fn from_id(id: u32) -> RankingResult<LiftingRule> {
        LiftingRule::ALL
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(RankingError::UnknownLiftingRule {
                name: id.to_string(),
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            LiftingRule::Minmax => "minmax",
            LiftingRule::Maxmin => "maxmin",
            LiftingRule::Leximin => "leximin",
            LiftingRule::Leximax => "leximax",
            LiftingRule::Borda => "borda",
            LiftingRule::IndirectUtility => "indirect_utility",
            LiftingRule::Cardinality => "cardinality",
            LiftingRule::IndirectUtilityThenCardinality => "indirect_utility_cardinality",
            LiftingRule::CardinalityThenIndirectUtility => "cardinality_indirect_utility",
        }
    }

    /// True if the rule never places the empty coalition in its output.
    pub fn excludes_empty_coalition(&self) -> bool {
        !matches!(
            self,
            LiftingRule::Leximin | LiftingRule::Leximax | LiftingRule::Borda
        )
    }
}

impl Display for LiftingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LiftingRule {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u32>() {
            return LiftingRule::from_id(id);
        }
        match s {
            // Name used in the experiment reports.
            "bordasum" => Ok(LiftingRule::Borda),
            _ => LiftingRule::ALL
                .iter()
                .find(|r| r.name() == s)
                .cloned()
                .ok_or(RankingError::UnknownLiftingRule {
                    name: s.to_string(),
                }),
        }
    }
}

/// The procedures that derive a ranking over individuals from an order over coalitions.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum RankingRule {
    Lexcel,
    CpMajority,
    OrdinalBanzhaf,
}

impl RankingRule {
    pub const ALL: [RankingRule; 3] = [
        RankingRule::Lexcel,
        RankingRule::CpMajority,
        RankingRule::OrdinalBanzhaf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RankingRule::Lexcel => "lexcel",
            RankingRule::CpMajority => "cp_majority",
            RankingRule::OrdinalBanzhaf => "ordinal_banzhaf",
        }
    }
}

impl Display for RankingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RankingRule {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankingRule::ALL
            .iter()
            .find(|r| r.name() == s)
            .cloned()
            .ok_or(RankingError::UnknownRankingRule {
                name: s.to_string(),
            })
    }
}

// ********* Configuration **********

/// Which coalitions the cardinality-based rules put first.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SizePreference {
    Larger,
    Smaller,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LiftingConfig {
    pub size_preference: SizePreference,
}

impl LiftingConfig {
    pub const DEFAULT: LiftingConfig = LiftingConfig {
        size_preference: SizePreference::Larger,
    };
}

impl Default for LiftingConfig {
    fn default() -> Self {
        LiftingConfig::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifting_rule_ids_round_trip() {
        for rule in LiftingRule::ALL {
            assert_eq!(LiftingRule::from_id(rule.id()), Ok(rule));
            assert_eq!(rule.name().parse::<LiftingRule>(), Ok(rule));
        }
        assert_eq!("3".parse::<LiftingRule>(), Ok(LiftingRule::Leximin));
        assert_eq!("bordasum".parse::<LiftingRule>(), Ok(LiftingRule::Borda));
    }

    #[test]
    fn unknown_rules_are_reported() {
        assert_eq!(
            LiftingRule::from_id(10),
            Err(RankingError::UnknownLiftingRule {
                name: "10".to_string()
            })
        );
        assert!(matches!(
            "copeland".parse::<RankingRule>(),
            Err(RankingError::UnknownRankingRule { .. })
        ));
        assert_eq!("lexcel".parse::<RankingRule>(), Ok(RankingRule::Lexcel));
    }

    #[test]
    fn empty_coalition_support() {
        assert!(LiftingRule::Minmax.excludes_empty_coalition());
        assert!(LiftingRule::Cardinality.excludes_empty_coalition());
        assert!(!LiftingRule::Leximax.excludes_empty_coalition());
        assert!(!LiftingRule::Borda.excludes_empty_coalition());
    }
}
