//! wptreport data model and result normalization
//!
//! A raw wptreport carries one status string per test and per subtest. The
//! dashboard only cares about a binary pass signal, so normalization flattens
//! every status to a 0/1 score keyed by test path. Large runs are sharded
//! into chunk files by the WPT runner; [`merge_chunked_reports`] reassembles
//! them into a single report before normalization.

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::merge::merge_nonoverlap;

/// The status string a test or subtest must report to score a point
pub const STATUS_PASS: &str = "PASS";

/// One test entry from a raw wptreport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTestEntry {
    /// Test path, e.g. `/css/CSS2/floats-clear/float-replaced-width-004.xht`
    pub test: String,
    /// Harness status (`PASS`, `FAIL`, `ERROR`, `TIMEOUT`, ...)
    pub status: String,
    /// Per-subtest results; absent in the JSON for tests without subtests
    #[serde(default)]
    pub subtests: Vec<RawSubtest>,
}

/// One subtest result within a test entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSubtest {
    pub name: String,
    pub status: String,
}

/// A raw wptreport document as produced by the WPT runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReport {
    /// Free-form run metadata (product, revision, os, ...)
    pub run_info: Value,
    pub results: Vec<RawTestEntry>,
}

impl RawReport {
    /// Deserializes a report from an already-parsed JSON value, mapping
    /// schema violations to [`Error::MalformedReport`].
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::MalformedReport(e.to_string()))
    }

    /// Deserializes a report from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::MalformedReport(e.to_string()))
    }
}

/// Binary score for a single subtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtestScore {
    /// 1 iff the subtest status was `PASS`
    pub score: u32,
}

/// Binary score for a single test plus its subtests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    /// 1 iff the test's own harness status was `PASS`
    pub score: u32,
    /// Empty (not omitted) for tests without subtests. Plain hash-map
    /// semantics: subtest names that collide with host-language builtins
    /// (`toString`, `constructor`, ...) are ordinary keys here.
    pub subtests: HashMap<String, SubtestScore>,
}

/// A normalized run: pass-through metadata plus per-test binary scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRun {
    pub run_info: Value,
    pub test_scores: HashMap<String, TestScore>,
}

fn score_for(status: &str) -> u32 {
    u32::from(status == STATUS_PASS)
}

/// Converts a raw report into a [`NormalizedRun`].
///
/// `run_info` passes through unchanged. Result order is irrelevant downstream
/// (consumers only do key lookups); a duplicated test key is tolerated with
/// last-write-wins, but flagged since it points at a defective report.
pub fn normalize(raw: &RawReport) -> NormalizedRun {
    let mut test_scores =
        HashMap::with_capacity_and_hasher(raw.results.len(), Default::default());

    for entry in &raw.results {
        let subtests = entry
            .subtests
            .iter()
            .map(|s| (s.name.clone(), SubtestScore { score: score_for(&s.status) }))
            .collect();
        let previous = test_scores.insert(
            entry.test.clone(),
            TestScore {
                score: score_for(&entry.status),
                subtests,
            },
        );
        if previous.is_some() {
            warn!(test = %entry.test, "duplicate test entry in report, keeping the last one");
        }
    }

    NormalizedRun {
        run_info: raw.run_info.clone(),
        test_scores,
    }
}

/// Reassembles sharded wptreport chunks into one report.
///
/// `results` are concatenated in chunk order; the chunks' `run_info` objects
/// are combined with [`merge_nonoverlap`], so disjoint metadata fragments
/// merge cleanly and conflicting ones fail the whole call.
pub fn merge_chunked_reports(chunks: Vec<RawReport>) -> Result<RawReport> {
    let mut run_info = serde_json::Map::new();
    let mut results = Vec::new();

    for chunk in chunks {
        let info = match chunk.run_info {
            Value::Object(map) => map,
            other => {
                return Err(Error::MalformedReport(format!(
                    "run_info must be an object, got {other}"
                )))
            }
        };
        run_info = merge_nonoverlap(&run_info, &info)?;
        results.extend(chunk.results);
    }

    Ok(RawReport {
        run_info: Value::Object(run_info),
        results,
    })
}
