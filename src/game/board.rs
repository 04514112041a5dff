use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Opaque reference to a user-supplied image. Used as the render source and
/// as the equality key when two cards are compared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(source: impl Into<String>) -> Self {
        ImageRef(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        ImageRef::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        ImageRef(value)
    }
}

/// Position-independent handle for a card within one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub identity: ImageRef,
    pub status: CardStatus,
}

impl Card {
    pub fn new(id: CardId, identity: ImageRef) -> Self {
        Card {
            id,
            identity,
            status: CardStatus::Hidden,
        }
    }

    /// Face-up, either pending or matched.
    pub fn is_revealed(&self) -> bool {
        self.status != CardStatus::Hidden
    }

    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }
}

/// Number of pairs a board will hold for the given pool and preset.
pub fn effective_pair_count(available: usize, pair_count: usize) -> usize {
    available.min(pair_count)
}

/// Builds a shuffled board holding two cards per image.
///
/// Only the first `pair_count` images are used; a smaller pool yields a
/// smaller board. The order is a uniform Fisher-Yates permutation drawn from
/// `rng`, and card ids follow board position.
pub fn build_board<R: Rng + ?Sized>(
    image_refs: &[ImageRef],
    pair_count: usize,
    rng: &mut R,
) -> Result<Vec<Card>> {
    if image_refs.is_empty() {
        return Err(GameError::NoImagesSelected);
    }
    if pair_count == 0 {
        return Err(GameError::InvalidConfig("pair count must be positive".into()));
    }

    let pairs = effective_pair_count(image_refs.len(), pair_count);
    let mut identities = Vec::with_capacity(pairs * 2);
    for image in &image_refs[..pairs] {
        identities.push(image.clone());
        identities.push(image.clone());
    }
    identities.shuffle(rng);

    Ok(identities
        .into_iter()
        .enumerate()
        .map(|(idx, identity)| Card::new(CardId(idx), identity))
        .collect())
}
