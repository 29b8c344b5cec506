//! JSON output formatting

use std::path::Path;

use samplerate_core::Algorithm;
use serde::Serialize;

use crate::convert::ConvertReport;

#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub input_file: String,
    pub error: String,
}

/// Result of one `srconvert` run
#[derive(Debug, Serialize)]
pub struct ConvertSummary {
    pub status: &'static str,
    pub converted: usize,
    pub failed: usize,
    pub results: Vec<ConvertReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FailedFile>,
}

impl ConvertSummary {
    pub fn from_outcomes<P: AsRef<Path>>(outcomes: Vec<(P, anyhow::Result<ConvertReport>)>) -> Self {
        let mut results = Vec::new();
        let mut errors = Vec::new();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(report) => results.push(report),
                Err(e) => errors.push(FailedFile {
                    input_file: path.as_ref().display().to_string(),
                    error: format!("{:#}", e),
                }),
            }
        }

        let status = match (results.is_empty(), errors.is_empty()) {
            (_, true) => "success",
            (false, false) => "partial",
            (true, false) => "error",
        };

        Self {
            status,
            converted: results.len(),
            failed: errors.len(),
            results,
            errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlgorithmInfo {
    pub id: i32,
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<Algorithm> for AlgorithmInfo {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            id: algorithm.id(),
            slug: algorithm.slug(),
            name: algorithm.name(),
            description: algorithm.description(),
        }
    }
}

/// What `srinfo` reports
#[derive(Debug, Serialize)]
pub struct LibraryInfo {
    pub version: &'static str,
    pub algorithms: Vec<AlgorithmInfo>,
}

impl LibraryInfo {
    pub fn collect() -> Self {
        Self {
            version: samplerate_core::version(),
            algorithms: Algorithm::ALL.into_iter().map(AlgorithmInfo::from).collect(),
        }
    }
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}
