//! Wptscore: normalized, comparable scoring of Web-Platform-Tests runs
//!
//! Wptscore ingests raw wptreport documents (one per engine run), flattens
//! every test and subtest status to a binary score, buckets tests into
//! hierarchical focus areas, and aggregates pass/fail metrics per area so a
//! baseline and a candidate engine build can be compared.
//!
//! # Quick Start
//!
//! ```no_run
//! use wptscore::{focus, report, score};
//!
//! fn main() -> wptscore::Result<()> {
//!     let bytes = std::fs::read("wptreport.json")?;
//!     let raw = report::RawReport::from_slice(&bytes)?;
//!     let run = report::normalize(&raw);
//!     let focus_map = focus::focus_areas_map(&run);
//!     let scores = score::score_runs(&run, &run, &focus_map);
//!     println!("{}", serde_json::to_string_pretty(&scores)?);
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! The scoring pipeline flows: wptreport JSON → [`report`] → [`focus`] → [`score`] → per-area scores
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Core** | [`report`], [`focus`], [`score`], [`error`](Error) |
//! | **Utility** | [`merge`] (run-metadata fragment merging) |

pub mod focus;
pub mod merge;
pub mod report;
pub mod score;

mod error;

pub use error::{Error, MergeConflictKind, Result};
pub use focus::{classify, focus_areas_map, FocusAreaMap};
pub use merge::merge_nonoverlap;
pub use report::{
    merge_chunked_reports, normalize, NormalizedRun, RawReport, RawSubtest, RawTestEntry,
    SubtestScore, TestScore,
};
pub use score::{score_runs, CategoryScore};

/// Wptscore version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
