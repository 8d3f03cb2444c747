use std::collections::HashMap;

use crate::engine::{DuplicateRecord, NameMatcher, RawEntry};
use crate::error::AnalyzeError;

/// The default deterministic matcher: trim + lowercase, exact key equality.
///
/// Internal whitespace is deliberately left alone, so "Al  ice" and "Al ice"
/// group separately. Broader normalization (punctuation stripping, phonetic
/// folding) belongs in an alternate [`NameMatcher`], not here.
pub struct ExactMatcher;

/// Compute the grouping key for a line: surrounding whitespace removed,
/// lowercased. Idempotent.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One normalized name's bookkeeping before the duplicate filter is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameGroup {
    pub display_name: String,
    pub count: u64,
}

/// Group entries by normalized key, in first-appearance order, keeping the
/// first occurrence's trimmed text as the display form. Includes singletons.
pub(crate) fn group_all(entries: &[RawEntry]) -> Vec<NameGroup> {
    let mut groups: Vec<NameGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = normalize(&entry.text);
        if key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(key, groups.len());
                groups.push(NameGroup {
                    display_name: entry.text.trim().to_string(),
                    count: 1,
                });
            }
        }
    }

    groups
}

impl NameMatcher for ExactMatcher {
    fn group(&self, entries: &[RawEntry]) -> Result<Vec<DuplicateRecord>, AnalyzeError> {
        let records = group_all(entries)
            .into_iter()
            .filter(|g| g.count > 1)
            .map(|g| DuplicateRecord {
                display_name: g.display_name,
                count: g.count,
            })
            .collect();
        Ok(records)
    }
}
