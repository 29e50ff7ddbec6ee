//! Projection of a snapshot into a view tree.
//!
//! Nothing here touches the network, storage, or a terminal. Painters in
//! [`crate::paint`] and the TUI consume the returned [`Page`].

use crate::filter::{Query, filter_groups, filter_items};
use crate::gate::AccessGate;
use crate::model::{Item, Snapshot, SourceGroup};
use crate::refresh::RefreshStatus;

mod time_fmt;
mod view;

pub use self::time_fmt::{
    NEXT_UPDATE_INTERVAL, PLACEHOLDER, format_timestamp, next_update_label, parse_timestamp,
    relative_age, updated_label,
};
pub use self::view::{
    DigestBody, DigestView, GateView, HighlightSection, ItemView, Page, SectionBody,
    SourceSection,
};

pub const HIGHLIGHT_TITLE: &str = "Iran mentions";
pub const HIGHLIGHT_LIMIT: usize = 15;

pub const UNTITLED_SOURCE: &str = "Untitled Source";
pub const UNTITLED_ITEM: &str = "Untitled";
pub const MISSING_LINK: &str = "#";

pub const NO_HEADLINES_YET: &str = "No headlines yet. Check back after the next run.";
pub const NO_HEADLINES: &str = "No headlines.";
pub const NO_SOURCES_MATCH: &str = "No sources match the filter.";

/// `rel` for every outbound item link.
pub const LINK_REL: &str = "noopener noreferrer";

pub fn render_digest(snapshot: Option<&Snapshot>, query: &Query, show_summaries: bool) -> DigestView {
    let Some(snapshot) = snapshot else {
        return DigestView {
            highlights: None,
            body: DigestBody::NoHeadlines,
        };
    };

    let highlights = render_highlights(&snapshot.iran, query, show_summaries);

    let body = if snapshot.sources.is_empty() {
        DigestBody::NoHeadlines
    } else {
        let sections: Vec<SourceSection> = filter_groups(&snapshot.sources, query)
            .into_iter()
            .map(|(group, items)| render_section(group, &items, show_summaries))
            .collect();
        if sections.is_empty() {
            DigestBody::NoMatches
        } else {
            DigestBody::Sections(sections)
        }
    };

    DigestView { highlights, body }
}

pub fn render_page(
    snapshot: Option<&Snapshot>,
    query: &Query,
    show_summaries: bool,
    gate: &AccessGate,
    status: &RefreshStatus,
) -> Page {
    let generated_at = snapshot.and_then(|s| s.generated_at.as_deref());
    Page {
        status: status.to_string(),
        items: snapshot
            .map(|s| s.total_items().to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        sources: snapshot
            .map(|s| s.sources.len().to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        updated: updated_label(generated_at),
        next_update: next_update_label(generated_at),
        gate: GateView {
            visible: gate.is_locked(),
            message: gate.message().map(|m| m.to_string()),
        },
        digest: render_digest(snapshot, query, show_summaries),
    }
}

fn render_highlights(
    items: &[Item],
    query: &Query,
    show_summaries: bool,
) -> Option<HighlightSection> {
    let matched = filter_items(items, query);
    if matched.is_empty() {
        return None;
    }
    Some(HighlightSection {
        title: HIGHLIGHT_TITLE.to_string(),
        total_matches: matched.len(),
        items: render_items(matched.into_iter().take(HIGHLIGHT_LIMIT), show_summaries),
    })
}

fn render_section(group: &SourceGroup, items: &[&Item], show_summaries: bool) -> SourceSection {
    let body = if items.is_empty() {
        SectionBody::Empty
    } else {
        SectionBody::Items(render_items(items.iter().copied(), show_summaries))
    };
    SourceSection {
        heading: non_empty(group.source.as_deref())
            .unwrap_or(UNTITLED_SOURCE)
            .to_string(),
        feed_url: non_empty(group.source_url.as_deref()).map(str::to_string),
        item_count: items.len(),
        body,
    }
}

fn render_items<'a>(items: impl Iterator<Item = &'a Item>, show_summaries: bool) -> Vec<ItemView> {
    items
        .enumerate()
        .map(|(i, item)| ItemView {
            position: i + 1,
            title: non_empty(item.title.as_deref())
                .unwrap_or(UNTITLED_ITEM)
                .to_string(),
            href: non_empty(item.link.as_deref())
                .unwrap_or(MISSING_LINK)
                .to_string(),
            summary: if show_summaries {
                non_empty(item.summary.as_deref()).map(str::to_string)
            } else {
                None
            },
        })
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
