//! Raw pack documents.
//!
//! This is the pure parse step: a pack file is deserialized into these
//! structures with no linking or indexing. `Pack::finalize` turns a
//! `RawPack` into a finalized pack.

use serde::{Deserialize, Serialize};

use crate::cards::{Attributes, CardId, CardKind};

/// Identifier used when a pack doesn't declare one.
pub const DEFAULT_PACK_ID: &str = "untitled";

/// Display name used when a pack doesn't declare one.
pub const DEFAULT_PACK_NAME: &str = "Untitled Pack";

/// A pack document as written by its author.
///
/// Missing arrays deserialize as empty. Missing, null, or blank scalars are
/// replaced by their defaults through [`RawPack::id`] and [`RawPack::name`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPack {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    accent: Option<String>,

    #[serde(default)]
    cards: Option<Vec<RawCard>>,

    #[serde(default)]
    trophies: Option<Vec<Trophy>>,
}

impl RawPack {
    /// Parse a pack document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Pack identifier, or [`DEFAULT_PACK_ID`].
    #[must_use]
    pub fn id(&self) -> &str {
        non_blank(self.id.as_deref()).unwrap_or(DEFAULT_PACK_ID)
    }

    /// Display name, or [`DEFAULT_PACK_NAME`].
    #[must_use]
    pub fn name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or(DEFAULT_PACK_NAME)
    }

    /// Accent label, if the author set one.
    #[must_use]
    pub fn accent(&self) -> Option<&str> {
        non_blank(self.accent.as_deref())
    }

    /// Declared cards in file order.
    #[must_use]
    pub fn cards(&self) -> &[RawCard] {
        self.cards.as_deref().unwrap_or_default()
    }

    /// Declared trophies in file order.
    #[must_use]
    pub fn trophies(&self) -> &[Trophy] {
        self.trophies.as_deref().unwrap_or_default()
    }

    pub(crate) fn into_parts(self) -> (Vec<RawCard>, Vec<Trophy>) {
        (
            self.cards.unwrap_or_default(),
            self.trophies.unwrap_or_default(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// A card entry before linking.
///
/// `id` and `type` are required; every other field is payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawCard {
    pub id: CardId,

    #[serde(rename = "type")]
    pub kind: CardKind,

    #[serde(flatten)]
    pub attributes: Attributes,
}

/// An achievement entity owned by a pack.
///
/// The catalog only looks at `id`; the rest is kept for the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trophy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Trophy {
    /// Display name, falling back to the identifier.
    #[must_use]
    pub fn name(&self, locale: &str) -> Option<&str> {
        self.attributes
            .get_localized("name", locale)
            .or(self.id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawPack {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_when_missing() {
        let raw = parse(json!({}));
        assert_eq!(raw.id(), DEFAULT_PACK_ID);
        assert_eq!(raw.name(), DEFAULT_PACK_NAME);
        assert_eq!(raw.accent(), None);
        assert!(raw.cards().is_empty());
        assert!(raw.trophies().is_empty());
    }

    #[test]
    fn test_defaults_when_null_or_blank() {
        let raw = parse(json!({"id": null, "name": "  ", "cards": null, "trophies": null}));
        assert_eq!(raw.id(), "untitled");
        assert_eq!(raw.name(), "Untitled Pack");
        assert!(raw.cards().is_empty());
    }

    #[test]
    fn test_declared_scalars() {
        let raw = parse(json!({"id": "base", "name": "Base Set", "accent": "#c0ffee"}));
        assert_eq!(raw.id(), "base");
        assert_eq!(raw.name(), "Base Set");
        assert_eq!(raw.accent(), Some("#c0ffee"));
    }

    #[test]
    fn test_cards_keep_declaration_order_and_payload() {
        let raw = parse(json!({
            "cards": [
                {"id": "w1", "type": "response", "content": {"en": "A cat"}},
                {"id": "b1", "type": "prompt", "pick": 2},
                {"id": "w2", "type": "white"}
            ]
        }));

        let ids: Vec<_> = raw.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "b1", "w2"]);
        assert_eq!(raw.cards()[1].kind, CardKind::Prompt);
        assert_eq!(raw.cards()[1].attributes.get_int("pick", 1), 2);
        assert_eq!(raw.cards()[2].kind, CardKind::Response);
        assert!(raw.cards()[0].attributes.get("id").is_none());
    }

    #[test]
    fn test_card_missing_tag_is_rejected() {
        let result = serde_json::from_value::<RawPack>(json!({"cards": [{"id": "w1"}]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_card_missing_id_is_rejected() {
        let result = serde_json::from_value::<RawPack>(json!({"cards": [{"type": "prompt"}]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result =
            serde_json::from_value::<RawPack>(json!({"cards": [{"id": "x", "type": "blue"}]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_trophies() {
        let raw = parse(json!({
            "trophies": [
                {"id": "first-win", "name": {"en": "First Win"}},
                {"name": "Anonymous"}
            ]
        }));

        assert_eq!(raw.trophies().len(), 2);
        assert_eq!(raw.trophies()[0].id.as_deref(), Some("first-win"));
        assert_eq!(raw.trophies()[0].name("en"), Some("First Win"));
        assert_eq!(raw.trophies()[1].id, None);
        assert_eq!(raw.trophies()[1].name("en"), Some("Anonymous"));
    }
}
