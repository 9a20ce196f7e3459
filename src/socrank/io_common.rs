use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::json;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::fs;

use social_ranking::*;

use crate::socrank::*;

/// Reads and parses a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &str) -> SocrankResult<T> {
    info!("Attempting to read {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

pub fn read_summary(path: &str) -> SocrankResult<JSValue> {
    let js: JSValue = read_json(path)?;
    debug!("read summary: {:?}", js);
    Ok(js)
}

/// Writes to the given file, or to the standard output for `stdout` or no path at all.
pub fn write_output(out: Option<&str>, content: &str) -> SocrankResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

pub fn individuals_to_json(p: &Preorder<Individual>) -> JSValue {
    let classes: Vec<Vec<u32>> = p
        .classes()
        .iter()
        .map(|c| c.iter().map(|i| i.0).collect())
        .collect();
    json!(classes)
}

pub fn coalitions_to_json(p: &Preorder<Coalition>) -> JSValue {
    let classes: Vec<Vec<Vec<u32>>> = p
        .classes()
        .iter()
        .map(|class| {
            class
                .iter()
                .map(|c| c.members().iter().map(|i| i.0).collect())
                .collect()
        })
        .collect();
    json!(classes)
}

pub fn relation_to_json(r: &PairwiseRelation<Individual>) -> JSValue {
    let pairs: Vec<[u32; 2]> = r.iter().map(|(x, y)| [x.0, y.0]).collect();
    json!(pairs)
}
