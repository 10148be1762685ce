//! The card store: an ordered mapping from term to card.
//!
//! Insertion order is preserved and is observable behavior: hardest-card
//! ties, cross-match lookups, and the export file all iterate the deck in
//! the order cards were first inserted. The deck serializes as a JSON
//! object (`term -> {"definition": ..., "mistakes": ...}`) in that same
//! order.

use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single flashcard: the back-side answer plus its mistake counter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub definition: String,
    pub mistakes: u32,
}

impl Card {
    /// A fresh card with no recorded mistakes
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            mistakes: 0,
        }
    }
}

/// Ordered term -> card store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<(String, Card)>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == term)
    }

    pub fn contains_definition(&self, definition: &str) -> bool {
        self.entries.iter().any(|(_, c)| c.definition == definition)
    }

    pub fn get(&self, term: &str) -> Option<&Card> {
        self.entries
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, c)| c)
    }

    pub fn definition_of(&self, term: &str) -> Option<&str> {
        self.get(term).map(|c| c.definition.as_str())
    }

    /// First term (in insertion order) whose card carries this definition
    pub fn term_with_definition(&self, definition: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| c.definition == definition)
            .map(|(t, _)| t.as_str())
    }

    /// Add a new card, rejecting duplicate terms and definitions
    pub fn add(&mut self, term: impl Into<String>, definition: impl Into<String>) -> Result<()> {
        let term = term.into();
        let definition = definition.into();
        if self.contains_term(&term) {
            return Err(Error::DuplicateTerm(term));
        }
        if self.contains_definition(&definition) {
            return Err(Error::DuplicateDefinition(definition));
        }
        self.entries.push((term, Card::new(definition)));
        Ok(())
    }

    /// Insert or overwrite a card. An overwritten term keeps its original
    /// position; a new term is appended. Duplicate definitions are not
    /// checked here (import semantics).
    pub fn upsert(&mut self, term: String, card: Card) {
        match self.entries.iter_mut().find(|(t, _)| *t == term) {
            Some((_, existing)) => *existing = card,
            None => self.entries.push((term, card)),
        }
    }

    /// Merge an imported batch into this deck, overwriting on term
    /// collision. Returns the number of entries in the incoming batch.
    pub fn merge(&mut self, other: Deck) -> usize {
        let count = other.len();
        for (term, card) in other.entries {
            self.upsert(term, card);
        }
        count
    }

    pub fn remove(&mut self, term: &str) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|(t, _)| t == term)
            .ok_or_else(|| Error::CardNotFound(term.to_string()))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Bump the mistake counter for a card
    pub fn add_mistake(&mut self, term: &str) -> Result<()> {
        let card = self
            .entries
            .iter_mut()
            .find(|(t, _)| t == term)
            .map(|(_, c)| c)
            .ok_or_else(|| Error::CardNotFound(term.to_string()))?;
        card.mistakes += 1;
        Ok(())
    }

    /// Clear every card's mistake counter
    pub fn reset_stats(&mut self) {
        for (_, card) in &mut self.entries {
            card.mistakes = 0;
        }
    }

    /// Terms holding the maximum mistake count, in insertion order,
    /// together with that count. `None` when the deck is empty or no card
    /// has any mistakes.
    pub fn hardest(&self) -> Option<(Vec<&str>, u32)> {
        let max = self
            .entries
            .iter()
            .map(|(_, c)| c.mistakes)
            .max()
            .filter(|&m| m > 0)?;
        let terms = self
            .entries
            .iter()
            .filter(|(_, c)| c.mistakes == max)
            .map(|(t, _)| t.as_str())
            .collect();
        Some((terms, max))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Card)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), c))
    }
}

impl Serialize for Deck {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (term, card) in &self.entries {
            map.serialize_entry(term, card)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Deck {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DeckVisitor;

        impl<'de> Visitor<'de> for DeckVisitor {
            type Value = Deck;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of term to card")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<Deck, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut deck = Deck::new();
                while let Some((term, card)) = access.next_entry::<String, Card>()? {
                    deck.upsert(term, card);
                }
                Ok(deck)
            }
        }

        deserializer.deserialize_map(DeckVisitor)
    }
}
