//! Focus-area classification of test paths
//!
//! Scores are bucketed into hierarchical "focus areas" derived from the test
//! path. Every test lands in `all`; the CSS2 suite additionally lands in
//! `css`, `css2`, and its test-suite subdirectory (e.g. `floats-clear`),
//! matching the WPT `/css/CSS2/<area>/<file>` layout. Other suites currently
//! collapse into the `all` bucket.

use rustc_hash::FxHashMap as HashMap;

use crate::report::NormalizedRun;

/// The bucket every test belongs to
pub const AREA_ALL: &str = "all";

/// Test path → ordered focus-area labels, always led by `all`
pub type FocusAreaMap = HashMap<String, Vec<String>>;

/// `CSS` followed by one or more digits, e.g. `CSS2`, `CSS22`.
fn is_css_suite_dir(segment: &str) -> bool {
    match segment.strip_prefix("CSS") {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Maps a test path to its ordered focus-area labels.
///
/// `/css/CSS2/floats-clear/float-replaced-width-004.xht` classifies as
/// `["all", "css", "css2", "floats-clear"]`; any path outside that shape is
/// just `["all"]`. Trailing path segments (the filename) never contribute.
pub fn classify(test_path: &str) -> Vec<String> {
    let mut areas = vec![AREA_ALL.to_string()];

    let segments: Vec<&str> = test_path.split('/').filter(|s| !s.is_empty()).collect();
    if let ["css", suite, area, ..] = segments.as_slice() {
        if is_css_suite_dir(suite) {
            areas.push("css".to_string());
            areas.push(suite.to_lowercase());
            areas.push((*area).to_string());
        }
    }

    areas
}

/// Builds the focus-area map for a run: one entry per distinct test key,
/// regardless of subtest content.
pub fn focus_areas_map(run: &NormalizedRun) -> FocusAreaMap {
    run.test_scores
        .keys()
        .map(|test| (test.clone(), classify(test)))
        .collect()
}
