//! Quiz engine: random card sampling and answer grading.

use crate::{Deck, Error, Result};
use rand::Rng;

/// Outcome of grading one answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Answer matched the card's own definition exactly
    Correct,
    /// Answer was wrong and matches no other card
    Wrong { correct: String },
    /// Answer was wrong but is the definition of a different card
    CrossMatch {
        correct: String,
        matched_term: String,
    },
}

/// Draw `count` terms uniformly at random, with replacement.
///
/// The returned order is the order questions are asked in; a term may
/// appear zero, one, or several times. Fails with `EmptyDeck` when there
/// is nothing to draw from.
pub fn draw(deck: &Deck, count: usize, rng: &mut impl Rng) -> Result<Vec<String>> {
    let terms: Vec<&str> = deck.terms().collect();
    if terms.is_empty() {
        return Err(Error::EmptyDeck);
    }
    Ok((0..count)
        .map(|_| terms[rng.random_range(0..terms.len())].to_string())
        .collect())
}

/// Grade an answer for the asked term.
///
/// Comparison is exact: case-sensitive, no trimming. A wrong answer bumps
/// the asked card's mistake counter; the cross-match lookup then picks the
/// first card in insertion order whose definition equals the answer.
pub fn grade(deck: &mut Deck, term: &str, answer: &str) -> Result<Verdict> {
    let correct = deck
        .definition_of(term)
        .ok_or_else(|| Error::CardNotFound(term.to_string()))?
        .to_string();

    if answer == correct {
        return Ok(Verdict::Correct);
    }

    deck.add_mistake(term)?;

    match deck.term_with_definition(answer).map(|t| t.to_string()) {
        Some(matched_term) => Ok(Verdict::CrossMatch {
            correct,
            matched_term,
        }),
        None => Ok(Verdict::Wrong { correct }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn capitals_deck() -> Deck {
        let mut deck = Deck::new();
        deck.add("capital of France", "Paris").unwrap();
        deck.add("capital of Italy", "Rome").unwrap();
        deck
    }

    #[test]
    fn test_draw_empty_deck_fails() {
        let deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(draw(&deck, 3, &mut rng), Err(Error::EmptyDeck)));
    }

    #[test]
    fn test_draw_samples_with_replacement() {
        let mut deck = Deck::new();
        deck.add("only", "card").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        // More draws than cards is fine; every draw hits the same term
        let drawn = draw(&deck, 5, &mut rng).unwrap();
        assert_eq!(drawn, vec!["only"; 5]);
    }

    #[test]
    fn test_draw_only_known_terms() {
        let deck = capitals_deck();
        let mut rng = StdRng::seed_from_u64(42);

        let drawn = draw(&deck, 20, &mut rng).unwrap();
        assert_eq!(drawn.len(), 20);
        assert!(drawn.iter().all(|t| deck.contains_term(t)));
    }

    #[test]
    fn test_grade_correct_answer() {
        let mut deck = capitals_deck();
        let verdict = grade(&mut deck, "capital of France", "Paris").unwrap();
        assert_eq!(verdict, Verdict::Correct);
        assert_eq!(deck.get("capital of France").unwrap().mistakes, 0);
    }

    #[test]
    fn test_grade_wrong_answer() {
        let mut deck = capitals_deck();
        let verdict = grade(&mut deck, "capital of France", "Marseille").unwrap();
        assert_eq!(
            verdict,
            Verdict::Wrong {
                correct: "Paris".into()
            }
        );
        assert_eq!(deck.get("capital of France").unwrap().mistakes, 1);
    }

    #[test]
    fn test_grade_cross_match() {
        let mut deck = capitals_deck();
        let verdict = grade(&mut deck, "capital of France", "Rome").unwrap();
        assert_eq!(
            verdict,
            Verdict::CrossMatch {
                correct: "Paris".into(),
                matched_term: "capital of Italy".into(),
            }
        );
        // The asked card takes the mistake, not the matched one
        assert_eq!(deck.get("capital of France").unwrap().mistakes, 1);
        assert_eq!(deck.get("capital of Italy").unwrap().mistakes, 0);
    }

    #[test]
    fn test_grade_is_case_sensitive() {
        let mut deck = capitals_deck();
        let verdict = grade(&mut deck, "capital of France", "paris").unwrap();
        assert!(matches!(verdict, Verdict::Wrong { .. }));
        assert_eq!(deck.get("capital of France").unwrap().mistakes, 1);
    }
}
