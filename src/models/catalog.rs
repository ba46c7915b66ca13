use crate::models::BodyParameters;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Synthetic category that selects the full item sequence.
pub const ALL_CATEGORY: &str = "all";

/// A clothing item record from the `clothing_items` collection.
///
/// Records are created and updated externally; this application only reads
/// them. The snake_case field names match the remote collection's columns and
/// are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Renderer-resolvable reference passed verbatim to the viewer.
    pub model_path: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A named body preset from the `body_presets` collection.
///
/// Selecting a preset overwrites the current snapshot wholesale with the
/// embedded parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPreset {
    pub id: String,
    pub name: String,
    pub parameters: BodyParameters,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Derive the category chip set from fetched items: the synthetic "all" entry
/// followed by the distinct categories in first-observed order.
///
/// Categories are free-form strings owned by the catalog store, so this stays
/// an open string set rather than an enumerated type.
pub fn derive_categories(items: &[ClothingItem]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for item in items {
        seen.insert(item.category.as_str());
    }

    let mut categories = Vec::with_capacity(seen.len() + 1);
    categories.push(ALL_CATEGORY.to_string());
    categories.extend(seen.into_iter().map(String::from));
    categories
}

/// Filter the already-fetched item sequence by category.
///
/// `"all"` returns the full sequence; any other value returns exactly the
/// subset whose `category` equals it, preserving relative order. This is a
/// pure predicate over local data, never a new remote query.
pub fn filter_by_category(items: &[ClothingItem], category: &str) -> Vec<ClothingItem> {
    if category == ALL_CATEGORY {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.category == category)
        .cloned()
        .collect()
}
