use crate::model::Flashcard;

/// Which side of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

impl CardFace {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Cursor over a lecture's flashcards.
///
/// A session over zero cards is `Empty` and every operation on it is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashcardSession {
    Empty,
    Active {
        cards: Vec<Flashcard>,
        cursor: usize,
        face: CardFace,
    },
}

impl FlashcardSession {
    #[must_use]
    pub fn new(cards: Vec<Flashcard>) -> Self {
        if cards.is_empty() {
            Self::Empty
        } else {
            Self::Active {
                cards,
                cursor: 0,
                face: CardFace::Front,
            }
        }
    }

    pub fn flip(&mut self) {
        if let Self::Active { face, .. } = self {
            *face = face.flipped();
        }
    }

    /// Move forward one card, showing its front. Saturates at the last card.
    pub fn next(&mut self) {
        if let Self::Active {
            cards,
            cursor,
            face,
        } = self
        {
            *cursor = (*cursor + 1).min(cards.len() - 1);
            *face = CardFace::Front;
        }
    }

    /// Move back one card, showing its front. Saturates at the first card.
    pub fn prev(&mut self) {
        if let Self::Active { cursor, face, .. } = self {
            *cursor = cursor.saturating_sub(1);
            *face = CardFace::Front;
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Flashcard> {
        match self {
            Self::Empty => None,
            Self::Active { cards, cursor, .. } => cards.get(*cursor),
        }
    }

    /// Zero-based cursor, `None` when empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Active { cursor, .. } => Some(*cursor),
        }
    }

    /// One-based position for "card N of M" labels.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.cursor().map(|cursor| cursor + 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Active { cards, .. } => cards.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn face(&self) -> Option<CardFace> {
        match self {
            Self::Empty => None,
            Self::Active { face, .. } => Some(*face),
        }
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.face() == Some(CardFace::Back)
    }

    #[must_use]
    pub fn at_first(&self) -> bool {
        self.cursor().is_none_or(|cursor| cursor == 0)
    }

    #[must_use]
    pub fn at_last(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Active { cards, cursor, .. } => *cursor + 1 == cards.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bilingual;

    fn cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| {
                Flashcard::new(
                    Bilingual::new(format!("Q{i}"), format!("س{i}")),
                    Bilingual::new(format!("A{i}"), format!("ج{i}")),
                )
            })
            .collect()
    }

    #[test]
    fn empty_session_is_inert() {
        let mut session = FlashcardSession::new(Vec::new());
        session.flip();
        session.next();
        session.prev();
        assert_eq!(session, FlashcardSession::Empty);
        assert!(session.current().is_none());
        assert_eq!(session.position(), None);
        assert_eq!(session.len(), 0);
        assert!(!session.is_revealed());
    }

    #[test]
    fn starts_on_first_card_front() {
        let session = FlashcardSession::new(cards(3));
        assert_eq!(session.position(), Some(1));
        assert_eq!(session.face(), Some(CardFace::Front));
        assert_eq!(session.current().unwrap().question.en(), "Q0");
        assert!(session.at_first());
        assert!(!session.at_last());
    }

    #[test]
    fn flip_toggles_and_navigation_hides_answer() {
        let mut session = FlashcardSession::new(cards(3));
        session.flip();
        assert!(session.is_revealed());
        session.flip();
        assert!(!session.is_revealed());

        session.flip();
        session.next();
        assert!(!session.is_revealed());
        assert_eq!(session.position(), Some(2));

        session.flip();
        session.prev();
        assert!(!session.is_revealed());
        assert_eq!(session.position(), Some(1));
    }

    #[test]
    fn next_saturates_at_last_card() {
        for start in 0..4 {
            for steps in 0..7 {
                let mut session = FlashcardSession::new(cards(4));
                for _ in 0..start {
                    session.next();
                }
                for _ in 0..steps {
                    session.next();
                }
                assert_eq!(session.cursor(), Some((start + steps).min(3)));
            }
        }
    }

    #[test]
    fn prev_saturates_at_first_card() {
        let mut session = FlashcardSession::new(cards(2));
        session.prev();
        assert_eq!(session.cursor(), Some(0));
        session.next();
        session.next();
        assert!(session.at_last());
        session.prev();
        session.prev();
        session.prev();
        assert_eq!(session.cursor(), Some(0));
    }

    #[test]
    fn single_card_is_first_and_last() {
        let mut session = FlashcardSession::new(cards(1));
        assert!(session.at_first());
        assert!(session.at_last());
        session.next();
        assert_eq!(session.cursor(), Some(0));
    }
}
