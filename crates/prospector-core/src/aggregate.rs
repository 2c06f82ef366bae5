//! Merge of the three email sources into one set.

use crate::types::LookupResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Deduplicated union of every email source.
///
/// Membership is exact string equality: no case folding and no
/// sub-address stripping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Unique emails, sorted
    pub emails: BTreeSet<String>,
}

impl AggregatedResult {
    /// Number of unique emails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Whether no source produced anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Union synthesized emails with both lookup results.
///
/// Outcomes are ignored here; callers that need diagnostics inspect each
/// `LookupResult` before aggregating.
#[must_use]
pub fn aggregate(
    synthesized: &[String],
    result_a: &LookupResult,
    result_b: &LookupResult,
) -> AggregatedResult {
    let emails = synthesized
        .iter()
        .chain(&result_a.emails)
        .chain(&result_b.emails)
        .cloned()
        .collect();

    AggregatedResult { emails }
}
