//! Suspicious-match flagging.
//!
//! Flags routes whose automatic match looks unreliable: the pipeline
//! reported `WikidataNotFoundInDbData` and the matched/unmatched stop
//! counts do not clear the acceptance thresholds. The flag is only ever
//! applied as an explicit, caller-invoked filter.

use crate::model::{ResultKind, RouteResult};

/// Matching is acceptable when the matched-stop surplus clears an
/// escalating threshold as the unmatched count grows: generous up to 4
/// unmatched stops, stricter at 5 and 6, never beyond 6.
fn acceptable_counts(found: i64, not_found: i64) -> bool {
    not_found <= 4 && found - not_found >= 1
        || not_found == 5 && found - not_found >= 5
        || not_found == 6 && found - not_found >= 6
}

/// True when a row's match outcome should be flagged for review.
/// Only `WikidataNotFoundInDbData` rows can be suspicious; any other tag
/// short-circuits to false regardless of the counts.
pub fn suspicious_match(kind: &ResultKind, count_found: i64, count_not_found: i64) -> bool {
    *kind == ResultKind::WikidataNotFoundInDbData
        && !acceptable_counts(count_found, count_not_found)
}

/// Row-level wrapper over [`suspicious_match`]; absent counts are
/// treated as zero, an absent kind is never suspicious.
pub fn suspicious_route(row: &RouteResult) -> bool {
    match &row.result_kind {
        Some(kind) => suspicious_match(
            kind,
            row.count_db_stops_found.unwrap_or(0),
            row.count_db_stops_not_found.unwrap_or(0),
        ),
        None => false,
    }
}
