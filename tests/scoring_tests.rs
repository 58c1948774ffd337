//! Integration tests for normalization, focus-area classification, and
//! cross-run scoring
//!
//! The scoring scenarios here are the authoritative contract for the corner
//! cases where a test's presence differs between the scored run and the
//! reference run; keep them literal rather than deriving variants.

use rustc_hash::FxHashMap as HashMap;
use serde_json::json;
use wptscore::{
    classify, focus_areas_map, normalize, score_runs, CategoryScore, FocusAreaMap, NormalizedRun,
    RawReport, RawSubtest, RawTestEntry, SubtestScore, TestScore,
};

fn make_run(tests: &[(&str, u32, &[(&str, u32)])]) -> NormalizedRun {
    let mut test_scores = HashMap::default();
    for (test, score, subtests) in tests {
        let subtests = subtests
            .iter()
            .map(|(name, score)| (name.to_string(), SubtestScore { score: *score }))
            .collect();
        test_scores.insert(
            test.to_string(),
            TestScore {
                score: *score,
                subtests,
            },
        );
    }
    NormalizedRun {
        run_info: json!({}),
        test_scores,
    }
}

fn all_map(tests: &[&str]) -> FocusAreaMap {
    tests
        .iter()
        .map(|t| (t.to_string(), vec!["all".to_string()]))
        .collect()
}

mod normalization {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transforms_simple_wpt_results() {
        let raw = RawReport {
            run_info: json!({
                "product": "servo",
                "revision": "commitSha",
                "os": "Ubuntu"
            }),
            results: vec![
                RawTestEntry {
                    test: "test1".to_string(),
                    status: "PASS".to_string(),
                    subtests: vec![],
                },
                RawTestEntry {
                    test: "test2".to_string(),
                    status: "ERROR".to_string(),
                    subtests: vec![
                        RawSubtest {
                            name: "subtest1".to_string(),
                            status: "PASS".to_string(),
                        },
                        RawSubtest {
                            name: "subtest2".to_string(),
                            status: "FAIL".to_string(),
                        },
                    ],
                },
            ],
        };

        let processed = normalize(&raw);
        let expected = {
            let mut run = make_run(&[
                ("test1", 1, &[]),
                ("test2", 0, &[("subtest1", 1), ("subtest2", 0)]),
            ]);
            run.run_info = raw.run_info.clone();
            run
        };
        assert_eq!(processed, expected);
    }
}

mod scoring {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scores_individual_tests() {
        let run = make_run(&[("test1", 1, &[]), ("test2", 1, &[])]);
        let focus_map = all_map(&["test1", "test2"]);

        let score = score_runs(&run, &run, &focus_map);
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 1000,
                score_subtests: 2,
                score_tests: 2.0,
                total_subtests: 2,
                total_tests: 2,
            }
        );

        let run = make_run(&[("test1", 1, &[]), ("test2", 0, &[])]);
        let score = score_runs(&run, &run, &focus_map);
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 500,
                score_subtests: 1,
                score_tests: 1.0,
                total_subtests: 2,
                total_tests: 2,
            }
        );
    }

    #[test]
    fn scores_subtests() {
        let run = make_run(&[(
            "test1",
            0,
            &[("subtest1", 1), ("subtest2", 1), ("subtest3", 1)],
        )]);

        let score = score_runs(&run, &run, &all_map(&["test1"]));
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 1000,
                score_subtests: 3,
                score_tests: 1.0,
                total_subtests: 3,
                total_tests: 1,
            }
        );
    }

    #[test]
    fn scores_subtests_by_averaging() {
        let run = make_run(&[(
            "test1",
            0,
            &[("subtest1", 1), ("subtest2", 0), ("subtest3", 0)],
        )]);

        let score = score_runs(&run, &run, &all_map(&["test1"]));
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 333,
                score_subtests: 1,
                score_tests: 1.0 / 3.0,
                total_subtests: 3,
                total_tests: 1,
            }
        );
    }

    #[test]
    fn handles_subtest_names_colliding_with_builtins() {
        let run = make_run(&[("test1", 0, &[]), ("test2", 1, &[])]);
        let against_run = make_run(&[("test1", 1, &[("toString", 1)]), ("test2", 1, &[])]);

        let score = score_runs(&run, &against_run, &all_map(&["test1", "test2"]));
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 500,
                score_subtests: 1,
                score_tests: 1.0,
                total_subtests: 2,
                total_tests: 2,
            }
        );
    }

    #[test]
    fn counts_only_tests_present_in_reference_run() {
        let old_run = make_run(&[("test1", 1, &[]), ("test3", 0, &[])]);
        let new_run = make_run(&[("test2", 1, &[]), ("test3", 1, &[])]);
        let focus_map = all_map(&["test1", "test2", "test3"]);

        let score = score_runs(&old_run, &new_run, &focus_map);
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 0,
                score_subtests: 0,
                score_tests: 0.0,
                total_subtests: 1,
                total_tests: 2,
            }
        );

        let old_run = make_run(&[("test1", 1, &[]), ("test3", 1, &[])]);
        let score = score_runs(&old_run, &new_run, &focus_map);
        assert_eq!(
            score["all"],
            CategoryScore {
                per_mille: 500,
                score_subtests: 1,
                score_tests: 1.0,
                total_subtests: 1,
                total_tests: 2,
            }
        );
    }
}

mod focus_areas {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_the_focus_area_map_for_a_run() {
        let run = make_run(&[
            (
                "/css/CSS2/floats-clear/float-replaced-width-004.xht",
                0,
                &[("sub1", 0)],
            ),
            ("/css/CSS2/abspos/static-inside-table-cell.html", 0, &[]),
            (
                "/css/CSS2/margin-padding-clear/margin-right-078.xht",
                0,
                &[("sub2", 0)],
            ),
            ("/workers/semantics/multiple-workers/001.html", 0, &[]),
        ]);

        let map = focus_areas_map(&run);
        let expected: FocusAreaMap = [
            (
                "/css/CSS2/floats-clear/float-replaced-width-004.xht",
                vec!["all", "css", "css2", "floats-clear"],
            ),
            (
                "/css/CSS2/abspos/static-inside-table-cell.html",
                vec!["all", "css", "css2", "abspos"],
            ),
            (
                "/css/CSS2/margin-padding-clear/margin-right-078.xht",
                vec!["all", "css", "css2", "margin-padding-clear"],
            ),
            (
                "/workers/semantics/multiple-workers/001.html",
                vec!["all"],
            ),
        ]
        .into_iter()
        .map(|(test, areas)| {
            (
                test.to_string(),
                areas.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        assert_eq!(map, expected);
    }

    #[test]
    fn classifies_css2_and_other_paths() {
        assert_eq!(
            classify("/css/CSS2/floats-clear/float-replaced-width-004.xht"),
            ["all", "css", "css2", "floats-clear"]
        );
        assert_eq!(
            classify("/workers/semantics/multiple-workers/001.html"),
            ["all"]
        );
    }

    #[test]
    fn classifies_every_test_once_regardless_of_subtests() {
        let run = make_run(&[
            ("/dom/a.html", 1, &[("s1", 1), ("s2", 0)]),
            ("/dom/b.html", 0, &[]),
            ("/css/CSS2/abspos/c.html", 1, &[]),
        ]);
        let map = focus_areas_map(&run);
        assert_eq!(map.len(), 3);
    }
}

mod scoring_per_area {
    use super::*;
    use pretty_assertions::assert_eq;

    // End-to-end: normalize, build the focus map from the run, score per area.
    #[test]
    fn buckets_scores_per_focus_area() {
        let raw = RawReport {
            run_info: json!({"product": "servo"}),
            results: vec![
                RawTestEntry {
                    test: "/css/CSS2/floats-clear/a.xht".to_string(),
                    status: "PASS".to_string(),
                    subtests: vec![],
                },
                RawTestEntry {
                    test: "/css/CSS2/abspos/b.html".to_string(),
                    status: "FAIL".to_string(),
                    subtests: vec![],
                },
                RawTestEntry {
                    test: "/workers/c.html".to_string(),
                    status: "PASS".to_string(),
                    subtests: vec![],
                },
            ],
        };

        let run = normalize(&raw);
        let map = focus_areas_map(&run);
        let scores = score_runs(&run, &run, &map);

        assert_eq!(scores["all"].total_tests, 3);
        assert_eq!(scores["all"].per_mille, 667);

        assert_eq!(scores["css"].total_tests, 2);
        assert_eq!(scores["css2"].total_tests, 2);
        assert_eq!(scores["css"].per_mille, 500);

        assert_eq!(scores["floats-clear"].total_tests, 1);
        assert_eq!(scores["floats-clear"].per_mille, 1000);
        assert_eq!(scores["abspos"].per_mille, 0);

        // Only labels derived from the run's tests appear.
        assert_eq!(scores.len(), 5);
    }
}
