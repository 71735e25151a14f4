//! The card catalog.
//!
//! A `Catalog` is the ordered set of packs that loaded successfully. It is
//! built once and shared read-only, usually behind an `Arc`.

use super::pack::Pack;
use crate::cards::{Card, CardKind};

/// Read-only collection of finalized packs.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    packs: Vec<Pack>,
}

impl Catalog {
    /// Build a catalog from packs in display order.
    #[must_use]
    pub fn from_packs(packs: Vec<Pack>) -> Self {
        Self { packs }
    }

    #[must_use]
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// First pack with this identifier.
    #[must_use]
    pub fn pack(&self, id: &str) -> Option<&Pack> {
        self.packs.iter().find(|p| p.id().as_str() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Distinct cards of one variant across all packs.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.packs
            .iter()
            .map(|p| match kind {
                CardKind::Prompt => p.prompt_count(),
                CardKind::Response => p.response_count(),
            })
            .sum()
    }

    #[must_use]
    pub fn prompt_card_count(&self) -> usize {
        self.count(CardKind::Prompt)
    }

    #[must_use]
    pub fn response_card_count(&self) -> usize {
        self.count(CardKind::Response)
    }

    #[must_use]
    pub fn trophy_count(&self) -> usize {
        self.packs.iter().map(Pack::trophy_count).sum()
    }

    /// Look up a card of one variant, searching packs in order.
    #[must_use]
    pub fn find_card(&self, kind: CardKind, id: &str) -> Option<&Card> {
        self.packs.iter().find_map(|p| p.card(kind, id))
    }

    /// Indexed cards of one variant across all packs, in pack order.
    pub fn cards_of(&self, kind: CardKind) -> impl Iterator<Item = &Card> + '_ {
        self.packs.iter().flat_map(move |p| p.cards_of(kind))
    }
}
