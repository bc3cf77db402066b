use std::collections::BTreeMap;

use super::query::ALL_CATEGORIES;
use crate::parser::LogRecord;

/// Options for a category picker: `All` first, then every distinct
/// category in sorted order.
pub fn category_index<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> Vec<String> {
    let mut index = vec![ALL_CATEGORIES.to_string()];
    index.extend(category_counts(records).into_iter().map(|(category, _)| category));
    index
}

/// `(category, count)` pairs, sorted by category.
pub fn category_counts<'a>(
    records: impl IntoIterator<Item = &'a LogRecord>,
) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect()
}
