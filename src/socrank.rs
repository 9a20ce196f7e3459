use log::{debug, info, warn};

use social_ranking::*;
use snafu::{prelude::*, Snafu};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::socrank::config_reader::*;
use crate::socrank::experiment::*;
use crate::socrank::io_common::*;

pub mod config_reader;
pub mod experiment;
pub mod io_common;
pub mod sampling;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SocrankError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Ranking error: {source}"))]
    Ranking { source: RankingError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SocrankResult<T> = Result<T, SocrankError>;

/// Runs whichever mode the arguments select, writes the summary and checks it
/// against the reference.
pub fn run(args: &Args) -> SocrankResult<()> {
    let summary = if let Some(config_path) = &args.config {
        run_experiment_file(config_path)?
    } else if let Some(input_path) = &args.input {
        rank_file(input_path, &ranking_rules(&args.ranking)?)?
    } else if let Some(order) = &args.order {
        lift_and_rank(order, args)?
    } else {
        whatever!("One of --config, --input or --order must be provided")
    };

    let pretty_js = serde_json::to_string_pretty(&summary).context(SerializingJsonSnafu {})?;
    write_output(args.out.as_deref(), &pretty_js)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        check_reference(summary_p, &pretty_js)?;
    }
    Ok(())
}

fn check_reference(summary_path: &str, pretty_js: &str) -> SocrankResult<()> {
    let summary_ref = read_summary(summary_path)?;
    let pretty_js_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {}", summary_path);
    Ok(())
}

fn ranking_rules(names: &Option<Vec<String>>) -> SocrankResult<Vec<RankingRule>> {
    match names {
        None => Ok(RankingRule::ALL.to_vec()),
        Some(l) if l.is_empty() => Ok(RankingRule::ALL.to_vec()),
        Some(l) => l
            .iter()
            .map(|s| s.trim().parse::<RankingRule>().context(RankingSnafu {}))
            .collect(),
    }
}

fn rankings_to_json(
    coalitions: &Preorder<Coalition>,
    population: &[Individual],
    rules: &[RankingRule],
) -> SocrankResult<JSValue> {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for rule in rules {
        let ranked = social_rank(*rule, coalitions, population).context(RankingSnafu {})?;
        let js = match ranked {
            SocialRanking::Preorder(p) => json!({ "preorder": individuals_to_json(&p) }),
            SocialRanking::Relation(r) => {
                let p = assemble_from_dominance_counts(&r, population);
                json!({
                    "relation": relation_to_json(&r),
                    "preorder": individuals_to_json(&p)
                })
            }
        };
        res.insert(rule.name().to_string(), js);
    }
    Ok(JSValue::Object(res))
}

/// Ranks a preorder over coalitions read from a file.
fn rank_file(path: &str, rules: &[RankingRule]) -> SocrankResult<JSValue> {
    let pf: PreorderFile = read_json(path)?;
    let coalitions = pf.to_preorder().context(RankingSnafu {})?;
    let pop = population(&pf.population);
    info!(
        "rank_file: {} coalitions in {} classes over {} individuals",
        coalitions.len(),
        coalitions.num_classes(),
        pop.len()
    );
    Ok(json!({
        "population": pf.population,
        "rankings": rankings_to_json(&coalitions, &pop, rules)?
    }))
}

/// Lifts a strict order given on the command line and ranks the result back.
fn lift_and_rank(order_ids: &[u32], args: &Args) -> SocrankResult<JSValue> {
    let order = StrictOrder::from_ids(order_ids).context(RankingSnafu {})?;
    let mut pop = order.individuals().to_vec();
    pop.sort();
    let lifting: LiftingRule = match &args.lifting {
        Some(s) => s.trim().parse().context(RankingSnafu {})?,
        None => LiftingRule::Leximin,
    };
    let config = LiftingConfig {
        size_preference: if args.prefer_smaller {
            SizePreference::Smaller
        } else {
            SizePreference::Larger
        },
    };
    let coalitions = lift_order_with(lifting, &order, &pop, &config).context(RankingSnafu {})?;
    debug!("lift_and_rank: lifted: {:?}", coalitions);
    let rules = ranking_rules(&args.ranking)?;
    Ok(json!({
        "population": pop.iter().map(|i| i.0).collect::<Vec<u32>>(),
        "order": order_ids,
        "lifting": lifting.name(),
        "coalitions": coalitions_to_json(&coalitions),
        "rankings": rankings_to_json(&coalitions, &pop, &rules)?
    }))
}

fn run_experiment_file(config_path: &str) -> SocrankResult<JSValue> {
    let config: ExperimentConfig = read_json(config_path)?;
    info!("config: {:?}", config);
    let settings = validate_config(&config)?;
    let results = run_experiment(&settings)?;
    Ok(json!({
        "config": config,
        "results": results
    }))
}
