use crate::socrank::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The description of an experiment. All the fields are optional.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(rename = "populationSizes")]
    pub population_sizes: Option<Vec<u32>>,
    /// Names or numeric identifiers.
    #[serde(rename = "liftingRules")]
    pub lifting_rules: Option<Vec<JSValue>>,
    pub trials: Option<u32>,
    pub seed: Option<u32>,
    #[serde(rename = "keptFractions")]
    pub kept_fractions: Option<Vec<f64>>,
    #[serde(rename = "coalitionSize")]
    pub coalition_size: Option<usize>,
    #[serde(rename = "sizePreference")]
    pub size_preference: Option<String>,
}

impl ExperimentConfig {
    pub const DEFAULT_POPULATION_SIZES: [u32; 3] = [3, 4, 5];
    pub const DEFAULT_TRIALS: u32 = 100;
    pub const DEFAULT_KEPT_FRACTIONS: [f64; 11] =
        [0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.99];
    pub const DEFAULT_LIFTING_RULES: [LiftingRule; 5] = [
        LiftingRule::Minmax,
        LiftingRule::Maxmin,
        LiftingRule::Leximin,
        LiftingRule::Leximax,
        LiftingRule::Borda,
    ];

    pub fn lifting_rules(&self) -> SocrankResult<Vec<LiftingRule>> {
        match &self.lifting_rules {
            None => Ok(ExperimentConfig::DEFAULT_LIFTING_RULES.to_vec()),
            Some(l) => l.iter().map(read_js_rule).collect(),
        }
    }

    pub fn size_preference(&self) -> SocrankResult<SizePreference> {
        match self.size_preference.as_deref() {
            None | Some("larger") => Ok(SizePreference::Larger),
            Some("smaller") => Ok(SizePreference::Smaller),
            Some(x) => whatever!("Failed to understand sizePreference option: {:?}", x),
        }
    }
}

fn read_js_rule(x: &JSValue) -> SocrankResult<LiftingRule> {
    match x {
        JSValue::Number(n) => match n.as_u64() {
            Some(id) if id <= u32::MAX as u64 => {
                LiftingRule::from_id(id as u32).context(RankingSnafu {})
            }
            _ => whatever!("Not a lifting rule identifier: {}", n),
        },
        JSValue::String(s) => s.parse::<LiftingRule>().context(RankingSnafu {}),
        _ => whatever!("Not a lifting rule: {:?}", x),
    }
}

/// A preorder over coalitions, as stored on disk.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PreorderFile {
    pub population: Vec<u32>,
    /// The equivalence classes, best first. Each coalition is the list of its members.
    pub classes: Vec<Vec<Vec<u32>>>,
}

impl PreorderFile {
    pub fn to_preorder(&self) -> RankingResult<Preorder<Coalition>> {
        check_population(&population(&self.population))?;
        let mut b = social_ranking::builder::Builder::new(&self.population);
        for class in self.classes.iter() {
            b.add_class(class)?;
        }
        Ok(b.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ExperimentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(
            config.lifting_rules().unwrap(),
            ExperimentConfig::DEFAULT_LIFTING_RULES.to_vec()
        );
        assert_eq!(config.size_preference().unwrap(), SizePreference::Larger);
    }

    #[test]
    fn reads_camel_case_fields() {
        let config: ExperimentConfig = serde_json::from_str(
            r#"{
                "populationSizes": [3],
                "liftingRules": ["minmax", 5, "bordasum"],
                "trials": 10,
                "seed": 7,
                "keptFractions": [0.5],
                "coalitionSize": 2,
                "sizePreference": "smaller"
            }"#,
        )
        .unwrap();
        assert_eq!(config.population_sizes, Some(vec![3]));
        assert_eq!(config.coalition_size, Some(2));
        assert_eq!(
            config.lifting_rules().unwrap(),
            vec![LiftingRule::Minmax, LiftingRule::Borda, LiftingRule::Borda]
        );
        assert_eq!(config.size_preference().unwrap(), SizePreference::Smaller);
    }

    #[test]
    fn rejects_unknown_rules() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"liftingRules": [12]}"#).unwrap();
        assert!(matches!(
            config.lifting_rules(),
            Err(SocrankError::Ranking { .. })
        ));
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"liftingRules": [true]}"#).unwrap();
        assert!(config.lifting_rules().is_err());
    }

    #[test]
    fn preorder_files() {
        let pf: PreorderFile = serde_json::from_str(
            r#"{"population": [1, 2], "classes": [[[1]], [[1, 2], []], [[2]]]}"#,
        )
        .unwrap();
        let p = pf.to_preorder().unwrap();
        assert_eq!(p.num_classes(), 3);
        assert_eq!(p.class_of(&Coalition::EMPTY), Some(1));
        let bad = PreorderFile {
            population: vec![1, 2],
            classes: vec![vec![vec![3]]],
        };
        assert!(bad.to_preorder().is_err());
    }
}
