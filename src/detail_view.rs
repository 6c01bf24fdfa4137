//! Display-ready strings for the card detail screen
//!
//! Every accessor falls back to a placeholder when the upstream field is
//! missing, so a sparsely populated detail still renders.

use crate::api::Endpoints;
use crate::models::{Attack, CatalogItemDetail, ImageQuality, Weakness};
use chrono::DateTime;
use reqwest::Url;

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";
/// Damage is never decoded, see [`Attack`]
pub const DAMAGE_PLACEHOLDER: &str = "??";

pub struct ItemDetailView<'a> {
    detail: &'a CatalogItemDetail,
}

impl<'a> ItemDetailView<'a> {
    pub fn new(detail: &'a CatalogItemDetail) -> Self {
        Self { detail }
    }

    pub fn card_name(&self) -> &str {
        self.detail.name.as_deref().unwrap_or("Unknown card")
    }

    /// High-quality image; `None` when the card has no image or it is malformed
    pub fn image_url(&self, endpoints: &Endpoints) -> Option<Url> {
        let base = self.detail.image.as_deref()?;
        endpoints.image_url(base, ImageQuality::High).ok()
    }

    pub fn set_symbol_url(&self) -> Option<Url> {
        let symbol = self.detail.set.as_ref()?.symbol.as_deref()?;
        Url::parse(symbol).ok()
    }

    pub fn illustrator(&self) -> String {
        format!(
            "Illustrator: {}",
            self.detail.illustrator.as_deref().unwrap_or(UNKNOWN)
        )
    }

    pub fn rarity(&self) -> String {
        format!("Rarity: {}", self.detail.rarity.as_deref().unwrap_or(UNKNOWN))
    }

    pub fn set_name(&self) -> String {
        let name = self
            .detail
            .set
            .as_ref()
            .and_then(|set| set.name.as_deref())
            .unwrap_or(UNKNOWN);
        format!("Set: {}", name)
    }

    pub fn hp(&self) -> String {
        format!("{} HP", self.detail.hp.unwrap_or(0))
    }

    pub fn types(&self) -> String {
        let types = match &self.detail.types {
            Some(types) if !types.is_empty() => types.join(", "),
            _ => UNKNOWN.to_string(),
        };
        format!("Type: {}", types)
    }

    pub fn evolve_from(&self) -> String {
        match self.detail.evolve_from.as_deref() {
            Some(from) if !from.is_empty() => format!("Evolves from: {}", from),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn description(&self) -> &str {
        self.detail
            .description
            .as_deref()
            .unwrap_or("No description available")
    }

    pub fn stage(&self) -> String {
        format!("Stage: {}", self.detail.stage.as_deref().unwrap_or(UNKNOWN))
    }

    pub fn attacks(&self) -> Vec<AttackView> {
        self.detail
            .attacks
            .iter()
            .flatten()
            .map(AttackView::new)
            .collect()
    }

    pub fn weaknesses(&self) -> Vec<WeaknessView> {
        self.detail
            .weaknesses
            .iter()
            .flatten()
            .map(WeaknessView::new)
            .collect()
    }

    pub fn retreat_cost(&self) -> String {
        format!("Retreat Cost: {}", self.detail.retreat.unwrap_or(0))
    }

    pub fn regulation_mark(&self) -> String {
        format!(
            "Regulation Mark: {}",
            self.detail.regulation_mark.as_deref().unwrap_or(UNKNOWN)
        )
    }

    pub fn legalities(&self) -> String {
        let legal = self.detail.legal.clone().unwrap_or_default();
        let mut statuses = Vec::new();
        if legal.standard.unwrap_or(false) {
            statuses.push("Standard");
        }
        if legal.expanded.unwrap_or(false) {
            statuses.push("Expanded");
        }

        let statuses = if statuses.is_empty() {
            "None".to_string()
        } else {
            statuses.join(", ")
        };
        format!("Legalities: {}", statuses)
    }

    pub fn last_updated(&self) -> String {
        format!("Last updated on {}", self.formatted_date())
    }

    /// Medium-style date (`17 Jun 2024`) in the timestamp's own offset; the raw
    /// value when it is not RFC 3339
    fn formatted_date(&self) -> String {
        match self.detail.updated.as_deref() {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(date) => date.format("%-d %b %Y").to_string(),
                Err(_) => raw.to_string(),
            },
            None => UNKNOWN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackView {
    pub name: String,
    pub effect: String,
    pub damage: String,
    pub cost: String,
}

impl AttackView {
    fn new(attack: &Attack) -> Self {
        Self {
            name: attack
                .name
                .clone()
                .unwrap_or_else(|| "Unknown attack".to_string()),
            effect: attack.effect.clone().unwrap_or_else(|| "No effect".to_string()),
            damage: DAMAGE_PLACEHOLDER.to_string(),
            cost: match &attack.cost {
                Some(cost) if !cost.is_empty() => cost.join(", "),
                _ => "No cost".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaknessView {
    pub kind: String,
    pub value: String,
}

impl WeaknessView {
    fn new(weakness: &Weakness) -> Self {
        Self {
            kind: weakness
                .kind
                .clone()
                .unwrap_or_else(|| "Unknown type".to_string()),
            value: weakness.value.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}
