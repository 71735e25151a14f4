//! Finalized packs.
//!
//! A `Pack` is built from a `RawPack` by [`Pack::finalize`], which runs the
//! single linking pass: every card gets its owner, and lands in the index
//! for its variant. Nothing on a finalized pack can be mutated afterwards.

use serde::{Deserialize, Serialize};

use super::raw::{RawPack, Trophy};
use crate::cards::{Card, CardId, CardIndex, CardKind};

/// Pack identifier.
///
/// Cards refer back to their pack through this value rather than through a
/// pointer, so packs and cards never form an ownership cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(pub String);

impl PackId {
    /// Create a new pack ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A card whose index entry was replaced by a later declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overwrite {
    pub kind: CardKind,
    pub id: CardId,
    /// Position of the card that lost its index entry.
    pub replaced: usize,
    /// Position of the card that now holds it.
    pub by: usize,
}

/// A finalized, immutable pack.
#[derive(Clone, Debug)]
pub struct Pack {
    id: PackId,
    name: String,
    accent: Option<String>,
    cards: Vec<Card>,
    trophies: Vec<Trophy>,
    prompts: CardIndex,
    responses: CardIndex,
    /// Indexed positions per variant, ascending. Fixed at finalize.
    prompt_order: Vec<usize>,
    response_order: Vec<usize>,
}

impl Pack {
    /// Link and index a raw pack.
    #[must_use]
    pub fn finalize(raw: RawPack) -> Self {
        Self::finalize_with_report(raw).0
    }

    /// Link and index a raw pack, reporting index overwrites.
    ///
    /// Duplicate identifiers within one variant keep the last declaration in
    /// the index. Every card, duplicates included, stays in [`Pack::cards`].
    #[must_use]
    pub fn finalize_with_report(raw: RawPack) -> (Self, Vec<Overwrite>) {
        let id = PackId::new(raw.id());
        let name = raw.name().to_string();
        let accent = raw.accent().map(str::to_string);
        let (raw_cards, trophies) = raw.into_parts();

        let mut cards = Vec::with_capacity(raw_cards.len());
        let mut prompts = CardIndex::new();
        let mut responses = CardIndex::new();
        let mut overwrites = Vec::new();

        for (position, raw_card) in raw_cards.into_iter().enumerate() {
            let card = Card::linked(raw_card.id, raw_card.kind, id.clone(), raw_card.attributes);

            let index = match card.kind() {
                CardKind::Prompt => &mut prompts,
                CardKind::Response => &mut responses,
            };
            if let Some(replaced) = index.insert(card.id().clone(), position) {
                overwrites.push(Overwrite {
                    kind: card.kind(),
                    id: card.id().clone(),
                    replaced,
                    by: position,
                });
            }

            cards.push(card);
        }

        let prompt_order = prompts.positions();
        let response_order = responses.positions();
        let pack = Self {
            id,
            name,
            accent,
            cards,
            trophies,
            prompts,
            responses,
            prompt_order,
            response_order,
        };
        (pack, overwrites)
    }

    /// Parse and finalize a pack document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        RawPack::from_json(text).map(Self::finalize)
    }

    #[must_use]
    pub fn id(&self) -> &PackId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn accent(&self) -> Option<&str> {
        self.accent.as_deref()
    }

    fn index(&self, kind: CardKind) -> &CardIndex {
        match kind {
            CardKind::Prompt => &self.prompts,
            CardKind::Response => &self.responses,
        }
    }

    /// Look up an indexed card of one variant.
    #[must_use]
    pub fn card(&self, kind: CardKind, id: &str) -> Option<&Card> {
        self.index(kind).get(id).map(|pos| &self.cards[pos])
    }

    /// Look up a prompt card.
    #[must_use]
    pub fn prompt_card(&self, id: &str) -> Option<&Card> {
        self.card(CardKind::Prompt, id)
    }

    /// Look up a response card.
    #[must_use]
    pub fn response_card(&self, id: &str) -> Option<&Card> {
        self.card(CardKind::Response, id)
    }

    /// Indexed cards of one variant, in declaration order.
    pub fn cards_of(&self, kind: CardKind) -> impl ExactSizeIterator<Item = &Card> + '_ {
        let order = match kind {
            CardKind::Prompt => &self.prompt_order,
            CardKind::Response => &self.response_order,
        };
        order.iter().map(move |&pos| &self.cards[pos])
    }

    pub fn prompt_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_of(CardKind::Prompt)
    }

    pub fn response_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_of(CardKind::Response)
    }

    /// Every declared card in file order, duplicates included.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn trophies(&self) -> &[Trophy] {
        &self.trophies
    }

    /// First trophy declared with `id`.
    #[must_use]
    pub fn trophy(&self, id: &str) -> Option<&Trophy> {
        self.trophies.iter().find(|t| t.id.as_deref() == Some(id))
    }

    /// Number of distinct prompt cards.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    /// Number of distinct response cards.
    #[must_use]
    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    /// Number of declared cards, duplicates included.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn trophy_count(&self) -> usize {
        self.trophies.len()
    }
}

impl std::fmt::Display for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} cards, {} trophies)",
            self.id,
            self.cards.len(),
            self.trophies.len()
        )
    }
}
