use super::*;
use crate::filter::Query;
use crate::gate::AccessGate;
use crate::model::{Item, Snapshot, SourceGroup};
use crate::render::{NO_HEADLINES_YET, render_page};
use crate::test_support::titled;

fn text_of(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect()
}

fn page(snapshot: Option<&Snapshot>, query: &str, summaries: bool) -> Page {
    render_page(
        snapshot,
        &Query::new(query),
        summaries,
        &AccessGate::new(),
        &RefreshStatus::Updated,
    )
}

#[test]
fn digest_lines_show_sections_and_items() {
    let snap = Snapshot {
        generated_at: None,
        sources: vec![
            SourceGroup {
                source: Some("A".to_string()),
                source_url: Some("https://a.example/rss".to_string()),
                items: vec![Item {
                    title: Some("X".to_string()),
                    link: Some("https://a.example/x".to_string()),
                    summary: Some("about x".to_string()),
                }],
            },
            SourceGroup {
                source: Some("B".to_string()),
                source_url: None,
                items: vec![],
            },
        ],
        iran: vec![titled("Iran X")],
        access_hash: None,
    };

    let lines = text_of(&digest_lines(&page(Some(&snap), "", true)));
    assert_eq!(lines[0], "Iran mentions (1)");
    assert_eq!(lines[1], "  1. Iran X");
    assert_eq!(lines[2], "     #");
    assert!(lines.contains(&"A  1  https://a.example/rss".to_string()));
    assert!(lines.contains(&"  1. X".to_string()));
    assert!(lines.contains(&"     https://a.example/x".to_string()));
    assert!(lines.contains(&"     about x".to_string()));
    assert!(lines.contains(&"B  0".to_string()));
    assert!(lines.contains(&NO_HEADLINES.to_string()));
}

#[test]
fn digest_lines_placeholder_without_snapshot() {
    let lines = text_of(&digest_lines(&page(None, "", false)));
    assert_eq!(lines, vec![NO_HEADLINES_YET.to_string()]);
}

#[test]
fn digest_lines_hide_summaries_when_off() {
    let snap = Snapshot {
        sources: vec![SourceGroup {
            source: Some("A".to_string()),
            source_url: None,
            items: vec![Item {
                title: Some("X".to_string()),
                link: None,
                summary: Some("about x".to_string()),
            }],
        }],
        ..Snapshot::default()
    };
    let lines = text_of(&digest_lines(&page(Some(&snap), "", false)));
    assert!(!lines.iter().any(|l| l.contains("about x")));
}
