use tracing::debug;

use super::board::{Card, CardId, CardStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatcherPhase {
    #[default]
    Idle,
    OneRevealed,
    Evaluating,
    /// Two mismatched cards are face-up and waiting to be hidden.
    Locked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownCard,
    AlreadyMatched,
    AlreadyRevealed,
    SelectionFull,
    Locked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    Revealed(CardId),
    Matched {
        first: CardId,
        second: CardId,
        won: bool,
    },
    Mismatched {
        first: CardId,
        second: CardId,
    },
}

/// Pairwise flip rules for one round.
#[derive(Clone, Debug, Default)]
pub struct FlipMatcher {
    pending: Vec<CardId>,
    phase: MatcherPhase,
    move_count: u32,
    matched_count: usize,
}

impl FlipMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatcherPhase {
        self.phase
    }

    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn is_locked(&self) -> bool {
        self.phase == MatcherPhase::Locked
    }

    pub fn select(&mut self, cards: &mut [Card], id: CardId) -> SelectOutcome {
        if let Some(reason) = self.rejection(cards, id) {
            debug!(card = id.index(), ?reason, "selection ignored");
            return SelectOutcome::Ignored(reason);
        }

        cards[id.index()].status = CardStatus::Revealed;
        self.pending.push(id);

        if self.pending.len() == 1 {
            self.phase = MatcherPhase::OneRevealed;
            return SelectOutcome::Revealed(id);
        }

        self.phase = MatcherPhase::Evaluating;
        self.move_count = self.move_count.saturating_add(1);
        let (first, second) = (self.pending[0], self.pending[1]);

        if cards[first.index()].identity == cards[second.index()].identity {
            cards[first.index()].status = CardStatus::Matched;
            cards[second.index()].status = CardStatus::Matched;
            self.pending.clear();
            self.matched_count += 2;
            self.phase = MatcherPhase::Idle;
            let won = self.matched_count == cards.len();
            debug!(
                first = first.index(),
                second = second.index(),
                matched = self.matched_count,
                "pair matched"
            );
            SelectOutcome::Matched { first, second, won }
        } else {
            self.phase = MatcherPhase::Locked;
            debug!(first = first.index(), second = second.index(), "pair mismatched");
            SelectOutcome::Mismatched { first, second }
        }
    }

    /// Turns a locked mismatch face-down again. Returns the hidden cards, or
    /// nothing when no mismatch is pending.
    pub fn hide_pending(&mut self, cards: &mut [Card]) -> Vec<CardId> {
        if self.phase != MatcherPhase::Locked {
            return Vec::new();
        }
        let hidden: Vec<CardId> = self.pending.drain(..).collect();
        for id in &hidden {
            if let Some(card) = cards.get_mut(id.index())
                && card.status == CardStatus::Revealed
            {
                card.status = CardStatus::Hidden;
            }
        }
        self.phase = MatcherPhase::Idle;
        hidden
    }

    fn rejection(&self, cards: &[Card], id: CardId) -> Option<IgnoreReason> {
        if self.phase == MatcherPhase::Locked {
            return Some(IgnoreReason::Locked);
        }
        let Some(card) = cards.get(id.index()) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if card.is_matched() {
            return Some(IgnoreReason::AlreadyMatched);
        }
        if self.pending.len() >= 2 {
            return Some(IgnoreReason::SelectionFull);
        }
        if self.pending.contains(&id) || card.is_revealed() {
            return Some(IgnoreReason::AlreadyRevealed);
        }
        None
    }
}
