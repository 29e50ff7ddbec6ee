use crate::model::{Item, SourceGroup};

/// A normalized free-text filter: trimmed and lower-cased.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty query matches everything and never hides a group.
    pub fn is_active(&self) -> bool {
        !self.0.is_empty()
    }
}

pub fn matches(item: &Item, query: &Query) -> bool {
    if !query.is_active() {
        return true;
    }
    let haystack = format!(
        "{} {}",
        item.title.as_deref().unwrap_or(""),
        item.summary.as_deref().unwrap_or("")
    )
    .to_lowercase();
    haystack.contains(query.as_str())
}

pub fn filter_items<'a>(items: &'a [Item], query: &Query) -> Vec<&'a Item> {
    items.iter().filter(|item| matches(item, query)).collect()
}

/// Groups paired with their surviving items, in server order.
///
/// With an active query, groups left with no items are dropped. Without one,
/// every group is kept, empty or not.
pub fn filter_groups<'a>(
    groups: &'a [SourceGroup],
    query: &Query,
) -> Vec<(&'a SourceGroup, Vec<&'a Item>)> {
    groups
        .iter()
        .map(|group| (group, filter_items(&group.items, query)))
        .filter(|(_, items)| !query.is_active() || !items.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
