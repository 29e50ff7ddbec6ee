use crate::model::Item;

/// An item with only a title.
pub(crate) fn titled(title: &str) -> Item {
    Item {
        title: Some(title.to_string()),
        ..Item::default()
    }
}
