use serde::{Deserialize, Serialize};

/// Image resolution tier served by the catalog asset host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageQuality {
    /// List thumbnails
    Low,
    /// Detail view
    High,
}

impl ImageQuality {
    /// Returns the path token used by the asset host (e.g., "low")
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Low => "low",
            ImageQuality::High => "high",
        }
    }
}

/// One catalog entry as shown in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    #[serde(rename = "localId")]
    pub local_id: String,
    pub name: String,
    /// Asset base URL; quality and extension are appended to get an image
    #[serde(
        rename = "image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_base_url: Option<String>,
}

/// Full attribute set for one catalog entry.
///
/// The upstream schema is inconsistently populated, so everything except `id`
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemDetail {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub illustrator: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub local_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub set: Option<SetInfo>,
    #[serde(default)]
    pub variants: Option<Variants>,
    #[serde(default)]
    pub dex_id: Option<Vec<u32>>,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub evolve_from: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub attacks: Option<Vec<Attack>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<Weakness>>,
    #[serde(default)]
    pub retreat: Option<u32>,
    #[serde(default)]
    pub regulation_mark: Option<String>,
    #[serde(default)]
    pub legal: Option<Legal>,
    /// Last-updated timestamp as sent by the server (usually RFC 3339)
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub card_count: Option<CardCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardCount {
    #[serde(default)]
    pub official: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variants {
    #[serde(default)]
    pub first_edition: Option<bool>,
    #[serde(default)]
    pub holo: Option<bool>,
    #[serde(default)]
    pub normal: Option<bool>,
    #[serde(default)]
    pub reverse: Option<bool>,
    #[serde(default)]
    pub w_promo: Option<bool>,
}

/// An attack. `damage` is deliberately absent: upstream sends it as either a
/// number or a string, so it is never decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Attack {
    #[serde(default)]
    pub cost: Option<Vec<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Weakness {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Legal {
    #[serde(default)]
    pub standard: Option<bool>,
    #[serde(default)]
    pub expanded: Option<bool>,
}

/// Decoded image payload, keyed by the URL it was fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub url: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageBlob {
    /// Memory footprint counted against the image cache budget
    pub fn memory_size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
