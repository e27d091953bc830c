use std::{io::BufRead, path::{Path, PathBuf}};

use anyhow::bail;
use itertools::Itertools;
use serde::{de::{Error, Visitor}, Deserialize};

use crate::error::ErrorKind;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TestOutput {
    Text(String),
    Anything, // A null output means we don't care about the value
}

pub struct EvaluationResult(Result<TestOutput, ErrorKind>);

impl From<EvaluationResult> for Result<TestOutput, ErrorKind> {
    fn from(value: EvaluationResult) -> Self {
        value.0
    }
}

struct EvaluationResultVisitor;

impl<'de> Deserialize<'de> for EvaluationResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de> {
        deserializer.deserialize_map(EvaluationResultVisitor)
    }
}

impl<'de> Visitor<'de> for EvaluationResultVisitor {
    type Value = EvaluationResult;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "A structure containing the boolean key 'ok'. If it's okay, contains the key 'output', otherwise the key 'type'")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>, {
        if map.next_key::<String>()?.as_deref() != Some("ok") {
            return Err(A::Error::custom("First key should be 'ok'"))
        }

        let ok: bool = map.next_value()?;
        let expected_key = if ok { "output" } else { "type" };
        if map.next_key::<String>()?.as_deref() != Some(expected_key) {
            return Err(A::Error::custom(format!("Second key should be '{}'", expected_key)))
        }

        let result = if ok {
            EvaluationResult(Ok(map.next_value::<TestOutput>()?))
        } else {
            let kind = match map.next_value::<String>()?.as_str() {
                "SyntaxError" => ErrorKind::SyntaxError,
                "NameError" => ErrorKind::NameError,
                "EvaluationError" => ErrorKind::EvaluationError,
                other => return Err(A::Error::custom(format!("Unrecognized error type: {}", other)))
            };
            EvaluationResult(Err(kind))
        };

        if map.next_key::<String>()?.is_some() {
            return Err(A::Error::custom("Only two keys should be present"));
        }

        Ok(result)
    }
}

fn load_input_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let source = std::fs::read(path)?;
    Ok(source.lines().collect::<Result<Vec<String>, _>>()?)
}

fn load_output_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<EvaluationResult>> {
    let source = std::fs::read(path)?;
    Ok(serde_json::from_slice(&source)?)
}

pub fn load_test_pair(testcase: usize) -> anyhow::Result<Vec<(String, Result<TestOutput, ErrorKind>)>> {
    let base_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let input = load_input_file(base_path.join("test_inputs").join(format!("{}.atom", testcase)))?;
    let output = load_output_file(base_path.join("test_outputs").join(format!("{}.json", testcase)))?;

    if input.len() != output.len() {
        bail!("Testcase {} has {} input lines but {} outputs", testcase, input.len(), output.len());
    }
    Ok(input.into_iter().zip(output.into_iter().map(Into::into)).collect_vec())
}

pub fn all_testcases() -> impl Iterator<Item = usize> {
    1..=5
}
