use serde::{Deserialize, Deserializer, Serialize};

/// One fetched `data.json` document.
///
/// Decoding is lenient: every field may be missing or `null`. An empty
/// `access_hash` means "no password configured" and is stored as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireSnapshot")]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub sources: Vec<SourceGroup>,
    pub iran: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_hash: Option<String>,
}

impl Snapshot {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn access_hash(&self) -> Option<&str> {
        self.access_hash.as_deref()
    }

    pub fn total_items(&self) -> usize {
        self.sources.iter().map(|g| g.items.len()).sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Deserialize)]
struct WireSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    generated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    sources: Vec<SourceGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    iran: Vec<Item>,
    #[serde(default, deserialize_with = "null_as_default")]
    access_hash: String,

    // Flat `items` list written by the first collector version.
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<FlatItem>,
}

#[derive(Deserialize)]
struct FlatItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
}

impl From<WireSnapshot> for Snapshot {
    fn from(wire: WireSnapshot) -> Self {
        let sources = if wire.sources.is_empty() && !wire.items.is_empty() {
            fold_flat_items(wire.items)
        } else {
            wire.sources
        };

        Self {
            generated_at: non_empty(wire.generated_at),
            sources,
            iran: wire.iran,
            access_hash: non_empty(wire.access_hash),
        }
    }
}

fn fold_flat_items(items: Vec<FlatItem>) -> Vec<SourceGroup> {
    let mut groups: Vec<SourceGroup> = Vec::new();
    for flat in items {
        let item = Item {
            title: flat.title,
            link: flat.link,
            summary: flat.summary,
        };
        match groups
            .iter_mut()
            .find(|g| g.source == flat.source && g.source_url == flat.source_url)
        {
            Some(group) => group.items.push(item),
            None => groups.push(SourceGroup {
                source: flat.source,
                source_url: flat.source_url,
                items: vec![item],
            }),
        }
    }
    groups
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
