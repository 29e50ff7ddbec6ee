use std::fmt::Write as _;

use super::GATE_PROMPT;
use crate::render::{ItemView, Page, SectionBody};

pub fn paint_text(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Newsdesk  {}", page.status);
    let _ = writeln!(out, "Items: {}  Sources: {}", page.items, page.sources);
    let _ = writeln!(
        out,
        "Last updated: {}  Next update: {}",
        page.updated, page.next_update
    );
    out.push('\n');

    if page.gate.visible {
        let _ = writeln!(out, "{}", GATE_PROMPT);
        if let Some(msg) = &page.gate.message {
            let _ = writeln!(out, "{}", msg);
        }
        return out;
    }

    if let Some(highlights) = &page.digest.highlights {
        let _ = writeln!(
            out,
            "== {} ({}) ==",
            highlights.title, highlights.total_matches
        );
        write_items(&mut out, &highlights.items);
        out.push('\n');
    }

    if let Some(placeholder) = page.digest.body.placeholder() {
        let _ = writeln!(out, "{}", placeholder);
        return out;
    }

    for section in page.digest.body.sections() {
        let mut heading = format!("== {} ({}) ==", section.heading, section.item_count);
        if let Some(url) = &section.feed_url {
            heading.push_str("  ");
            heading.push_str(url);
        }
        let _ = writeln!(out, "{}", heading);
        match &section.body {
            SectionBody::Empty => {
                let _ = writeln!(out, "{}", crate::render::NO_HEADLINES);
            }
            SectionBody::Items(items) => write_items(&mut out, items),
        }
        out.push('\n');
    }
    out
}

fn write_items(out: &mut String, items: &[ItemView]) {
    for item in items {
        let _ = writeln!(out, "{:>3}. {}", item.position, item.title);
        let _ = writeln!(out, "     {}", item.href);
        if let Some(summary) = &item.summary {
            let _ = writeln!(out, "     {}", summary);
        }
    }
}
