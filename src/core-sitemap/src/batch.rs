//! Grouping records by classifier and splitting them into bounded-size chunks.

use std::collections::BTreeMap;

use data_model_sitemap::Record;

use crate::config::{FeatureFlags, MaxUrls};

/// Identifies the group a record belongs to.
///
/// Ordering is the group processing order: `All` only exists when grouping is off,
/// classifier groups sort by their raw value, and unclassified records come last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// Grouping is disabled: every record belongs to one implicit group.
    All,
    /// Records sharing this raw classifier value.
    Classifier(String),
    /// Records without a classifier while grouping is enabled.
    Unclassified,
}

impl GroupKey {
    /// The label used to build file names, if this group is named at all.
    pub fn label(&self) -> Option<&str> {
        match self {
            GroupKey::All => None,
            GroupKey::Classifier(value) => Some(value),
            GroupKey::Unclassified => Some("unclassified"),
        }
    }

    /// The raw classifier value shared by the group. `None` for `All` and `Unclassified`.
    pub fn classifier(&self) -> Option<&str> {
        match self {
            GroupKey::Classifier(value) => Some(value),
            GroupKey::All | GroupKey::Unclassified => None,
        }
    }
}

/// Records sharing a `GroupKey`, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    pub key: GroupKey,
    pub records: Vec<Record>,
}

/// Splits items into consecutive chunks of `max_urls_per_file`; the last chunk may be shorter.
///
/// Produces `ceil(len / max)` chunks and preserves order, so concatenating the chunks
/// yields the input. An empty input yields no chunks.
///
/// # Examples
///
/// ```
/// # use core_sitemap::{batch, MaxUrls};
/// let chunks = batch(vec!["a", "b", "c"], MaxUrls::new(2).unwrap());
/// assert_eq!(chunks, vec![vec!["a", "b"], vec!["c"]]);
/// ```
pub fn batch<T>(items: Vec<T>, max_urls_per_file: MaxUrls) -> Vec<Vec<T>> {
    let size = max_urls_per_file.get();
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();

    while items.peek().is_some() {
        chunks.push(items.by_ref().take(size).collect());
    }

    chunks
}

/// Partitions records by their raw classifier value.
///
/// Groups come back sorted by classifier value, with records lacking a classifier
/// collected into a trailing `Unclassified` group. Input order is kept within each group.
pub fn group_by_classifier(records: Vec<Record>) -> Vec<RecordGroup> {
    let mut groups: BTreeMap<GroupKey, Vec<Record>> = BTreeMap::new();

    for record in records {
        let key = match &record.classifier {
            Some(value) => GroupKey::Classifier(value.clone()),
            None => GroupKey::Unclassified,
        };
        groups.entry(key).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(key, records)| RecordGroup { key, records })
        .collect()
}

/// Produces the groups a run processes: classifier groups when grouping is enabled,
/// otherwise a single `All` group (none at all for empty input).
pub fn partition(records: Vec<Record>, flags: &FeatureFlags) -> Vec<RecordGroup> {
    if flags.group_by_classifier {
        group_by_classifier(records)
    } else if records.is_empty() {
        Vec::new()
    } else {
        vec![RecordGroup {
            key: GroupKey::All,
            records,
        }]
    }
}
