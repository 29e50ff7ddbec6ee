use std::fmt::Write as _;

use super::GATE_PROMPT;
use crate::render::{ItemView, LINK_REL, NO_HEADLINES, Page, SectionBody};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Standalone HTML document for the page.
///
/// The gate only toggles `hidden` on the gate and content containers; the
/// digest markup is emitted either way.
pub fn paint_html(page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Newsdesk</title>\n</head>\n<body>\n");

    let _ = writeln!(
        out,
        "<header><p id=\"status\">{}</p><p>Items: <span id=\"count\">{}</span> Sources: <span id=\"sources\">{}</span></p><p>Last updated: <span id=\"updated\">{}</span> Next update: <span id=\"next\">{}</span></p></header>",
        html_escape(&page.status),
        html_escape(&page.items),
        html_escape(&page.sources),
        html_escape(&page.updated),
        html_escape(&page.next_update),
    );

    let _ = writeln!(
        out,
        "<section id=\"gate\"{}><p>{}</p><p id=\"gate-message\">{}</p></section>",
        hidden_attr(!page.gate.visible),
        GATE_PROMPT,
        html_escape(page.gate.message.as_deref().unwrap_or("")),
    );

    let _ = writeln!(out, "<main id=\"content\"{}>", hidden_attr(page.gate.visible));

    if let Some(highlights) = &page.digest.highlights {
        let _ = writeln!(
            out,
            "<section class=\"highlights\"><h2>{}</h2>",
            html_escape(&highlights.title)
        );
        write_items(&mut out, &highlights.items);
        out.push_str("</section>\n");
    }

    if let Some(placeholder) = page.digest.body.placeholder() {
        let _ = writeln!(out, "<div class=\"empty\">{}</div>", html_escape(placeholder));
    }

    for section in page.digest.body.sections() {
        out.push_str("<section class=\"source\">");
        let _ = write!(out, "<h2>{}</h2>", html_escape(&section.heading));
        if let Some(url) = &section.feed_url {
            let _ = write!(
                out,
                "<a class=\"feed\" href=\"{}\" target=\"_blank\" rel=\"{}\">feed</a>",
                html_escape(url),
                LINK_REL
            );
        }
        let _ = writeln!(out, "<span class=\"count\">{}</span>", section.item_count);
        match &section.body {
            SectionBody::Empty => {
                let _ = writeln!(out, "<div class=\"empty\">{}</div>", NO_HEADLINES);
            }
            SectionBody::Items(items) => write_items(&mut out, items),
        }
        out.push_str("</section>\n");
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn write_items(out: &mut String, items: &[ItemView]) {
    out.push_str("<ol>\n");
    for item in items {
        let _ = write!(
            out,
            "<li><a href=\"{}\" target=\"_blank\" rel=\"{}\">{}</a>",
            html_escape(&item.href),
            LINK_REL,
            html_escape(&item.title)
        );
        if let Some(summary) = &item.summary {
            let _ = write!(out, "<p class=\"summary\">{}</p>", html_escape(summary));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n");
}

fn hidden_attr(hidden: bool) -> &'static str {
    if hidden { " hidden" } else { "" }
}
