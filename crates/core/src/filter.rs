//! Derives the visible subset of the catalog from the view state.

use crate::catalog::{Catalog, Category, LocationRecord};
use crate::state::ViewState;

/// Whether `record` passes the category filter and the search text.
///
/// Search is a case-insensitive substring match against the name and the
/// description in the active language. An empty search matches everything.
pub fn matches(record: &LocationRecord, state: &ViewState) -> bool {
    if !state.category_filter().admits(record.category) {
        return false;
    }

    let search = state.search_text();
    if search.is_empty() {
        return true;
    }

    matches_needle(record, state, &search.to_lowercase())
}

fn matches_needle(record: &LocationRecord, state: &ViewState, needle: &str) -> bool {
    let language = state.language();
    record.name(language).to_lowercase().contains(needle)
        || record.description(language).to_lowercase().contains(needle)
}

/// Visible records in catalog order.
pub fn filter_locations<'a>(catalog: &'a Catalog, state: &ViewState) -> Vec<&'a LocationRecord> {
    let needle = state.search_text().to_lowercase();
    catalog
        .iter()
        .filter(|record| state.category_filter().admits(record.category))
        .filter(|record| needle.is_empty() || matches_needle(record, state, &needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub records: Vec<&'a LocationRecord>,
}

/// Groups records by category. Groups appear in order of first appearance
/// and keep the incoming order inside each group.
pub fn group_by_category<'a>(records: &[&'a LocationRecord]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();

    for &record in records {
        match groups
            .iter_mut()
            .find(|group| group.category == record.category)
        {
            Some(group) => group.records.push(record),
            None => groups.push(CategoryGroup {
                category: record.category,
                records: vec![record],
            }),
        }
    }

    groups
}
