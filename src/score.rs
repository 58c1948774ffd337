//! Per-focus-area score aggregation across two runs
//!
//! [`score_runs`] compares a run against a reference run (typically the
//! newest run, which also defines the focus-area map) and accumulates one
//! [`CategoryScore`] per focus area. A test is one unit, scored by the
//! fraction of its subtests that pass; subtest counts are carried alongside
//! so consumers can see the absolute volume behind each ratio.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::focus::FocusAreaMap;
use crate::report::NormalizedRun;

/// Accumulated counts and score for one focus area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Sum of per-test pass fractions (a test with 1 of 3 subtests passing
    /// contributes 1/3)
    pub score_tests: f64,
    pub total_tests: u64,
    /// Passing subtests (a test without subtests counts as one subtest)
    pub score_subtests: u64,
    pub total_subtests: u64,
    /// `round(1000 * score_tests / total_tests)`, 0 for an empty area
    pub per_mille: u64,
}

impl CategoryScore {
    fn finalize(&mut self) {
        self.per_mille = if self.total_tests == 0 {
            0
        } else {
            (1000.0 * self.score_tests / self.total_tests as f64).round() as u64
        };
    }
}

/// Scores `run` against `against_run` per focus area.
///
/// Only tests present in `against_run` are counted; the reference run defines
/// the test universe being compared, so tests that exist solely in `run`
/// (removed or renamed since) contribute nothing. Each counted test adds the
/// identical contribution to every label in its focus-area list:
///
/// - present in `run` with subtests: the subtest pass fraction, weighted as
///   one test unit;
/// - present in `run` without subtests: its own 0/1 score as both one test
///   unit and one subtest;
/// - absent from `run`: one entirely-failing test unit, with no subtest
///   denominator.
///
/// The output is ordered by label so serialized score reports are stable.
pub fn score_runs(
    run: &NormalizedRun,
    against_run: &NormalizedRun,
    focus_map: &FocusAreaMap,
) -> BTreeMap<String, CategoryScore> {
    let mut scores: BTreeMap<String, CategoryScore> = BTreeMap::new();

    for (test, areas) in focus_map {
        if !against_run.test_scores.contains_key(test) {
            continue;
        }

        let contribution = match run.test_scores.get(test) {
            Some(test_score) if !test_score.subtests.is_empty() => {
                let total = test_score.subtests.len() as u64;
                let passed: u64 = test_score.subtests.values().map(|s| u64::from(s.score)).sum();
                Contribution {
                    score_tests: passed as f64 / total as f64,
                    score_subtests: passed,
                    total_subtests: total,
                }
            }
            Some(test_score) => Contribution {
                score_tests: f64::from(test_score.score),
                score_subtests: u64::from(test_score.score),
                total_subtests: 1,
            },
            // The test ran in the reference run but not in this one: score it
            // as entirely failing, with nothing to count on the subtest side.
            None => Contribution {
                score_tests: 0.0,
                score_subtests: 0,
                total_subtests: 0,
            },
        };

        for area in areas {
            let entry = scores.entry(area.clone()).or_default();
            entry.score_tests += contribution.score_tests;
            entry.total_tests += 1;
            entry.score_subtests += contribution.score_subtests;
            entry.total_subtests += contribution.total_subtests;
        }
    }

    for score in scores.values_mut() {
        score.finalize();
    }

    scores
}

struct Contribution {
    score_tests: f64,
    score_subtests: u64,
    total_subtests: u64,
}
