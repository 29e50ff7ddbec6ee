use serde::Serialize;

/// Everything a painter needs to draw one frame of the digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    pub status: String,
    pub items: String,
    pub sources: String,
    pub updated: String,
    pub next_update: String,
    pub gate: GateView,
    pub digest: DigestView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GateView {
    /// When true the painter shows the password prompt instead of the digest.
    pub visible: bool,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DigestView {
    pub highlights: Option<HighlightSection>,
    pub body: DigestBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HighlightSection {
    pub title: String,
    /// Matches before the display cap was applied.
    pub total_matches: usize,
    pub items: Vec<ItemView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "sections", rename_all = "snake_case")]
pub enum DigestBody {
    NoHeadlines,
    NoMatches,
    Sections(Vec<SourceSection>),
}

impl DigestBody {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            DigestBody::NoHeadlines => Some(super::NO_HEADLINES_YET),
            DigestBody::NoMatches => Some(super::NO_SOURCES_MATCH),
            DigestBody::Sections(_) => None,
        }
    }

    pub fn sections(&self) -> &[SourceSection] {
        match self {
            DigestBody::Sections(sections) => sections,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceSection {
    pub heading: String,
    pub feed_url: Option<String>,
    pub item_count: usize,
    pub body: SectionBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    Empty,
    Items(Vec<ItemView>),
}

impl SectionBody {
    pub fn items(&self) -> &[ItemView] {
        match self {
            SectionBody::Items(items) => items,
            SectionBody::Empty => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub position: usize,
    pub title: String,
    pub href: String,
    pub summary: Option<String>,
}
