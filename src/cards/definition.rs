//! Card definitions.
//!
//! A `Card` is the finalized form of one entry in a pack's `cards` array.
//! It is only ever built by the pack linking pass, which is also the only
//! place its owner is assigned.

use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use crate::packs::PackId;

/// Card identifier, unique per pack and variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Card variant tag.
///
/// Older packs use the `black`/`white` names; both spellings are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Round-defining card read out by the judge.
    #[serde(alias = "black")]
    Prompt,
    /// Card played by players in answer to a prompt.
    #[serde(alias = "white")]
    Response,
}

impl CardKind {
    /// Both variants, prompt first.
    pub const ALL: [CardKind; 2] = [CardKind::Prompt, CardKind::Response];
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Prompt => f.write_str("prompt"),
            CardKind::Response => f.write_str("response"),
        }
    }
}

/// A finalized card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    id: CardId,
    kind: CardKind,
    owner: PackId,
    attributes: Attributes,
}

impl Card {
    pub(crate) fn linked(id: CardId, kind: CardKind, owner: PackId, attributes: Attributes) -> Self {
        Self {
            id,
            kind,
            owner,
            attributes,
        }
    }

    /// Card identifier.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Identifier of the pack this card came from.
    #[must_use]
    pub fn owner(&self) -> &PackId {
        &self.owner
    }

    /// Opaque payload.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn is_prompt(&self) -> bool {
        self.kind == CardKind::Prompt
    }

    #[must_use]
    pub fn is_response(&self) -> bool {
        self.kind == CardKind::Response
    }

    /// Number of responses a prompt asks for. Always 1 for response cards.
    #[must_use]
    pub fn pick(&self) -> i64 {
        match self.kind {
            CardKind::Prompt => self.attributes.get_int("pick", 1).max(1),
            CardKind::Response => 1,
        }
    }

    /// Card text in `locale`, falling back to English.
    #[must_use]
    pub fn text(&self, locale: &str) -> Option<&str> {
        self.attributes.get_localized("content", locale)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text(super::attributes::FALLBACK_LOCALE) {
            Some(text) => write!(f, "{}:{} \"{}\"", self.owner, self.id, text),
            None => write!(f, "{}:{}", self.owner, self.id),
        }
    }
}
