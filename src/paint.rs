//! Painters: thin adapters from a rendered [`Page`] to a concrete surface.

use anyhow::{Context, Result};

use crate::render::Page;

mod html;
mod text;

pub use self::html::{html_escape, paint_html};
pub use self::text::paint_text;

pub const GATE_PROMPT: &str = "This digest is password protected.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
}

pub fn paint(page: &Page, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(paint_text(page)),
        Format::Html => Ok(paint_html(page)),
        Format::Json => serde_json::to_string_pretty(page).context("serialize page json"),
    }
}

#[cfg(test)]
#[path = "tests/paint_tests.rs"]
mod tests;
