use std::collections::HashSet;

use rand::Rng;

use crate::db::Question;

/// `quiz_category.id` sent by the front-end when the player picks every category.
pub const ALL_CATEGORIES: i64 = 0;

/// Picks one of `candidates` not listed in `previous`, each with equal probability.
pub fn draw<R>(candidates: Vec<Question>, previous: &[i64], rng: &mut R) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let previous: HashSet<i64> = previous.iter().copied().collect();
    let mut remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    if remaining.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..remaining.len());
    Some(remaining.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            category: 1,
            difficulty: 1,
        }
    }

    fn questions(ids: &[i64]) -> Vec<Question> {
        ids.iter().copied().map(question).collect()
    }

    #[test]
    fn never_returns_a_previous_question() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let drawn = draw(questions(&[1, 2, 3, 4, 5]), &[1, 3, 5], &mut rng).unwrap();
            assert!(drawn.id == 2 || drawn.id == 4);
        }
    }

    #[test]
    fn exhausted_candidates_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(draw(questions(&[1, 2]), &[2, 1], &mut rng), None);
        assert_eq!(draw(Vec::new(), &[], &mut rng), None);
    }

    #[test]
    fn every_candidate_can_be_drawn() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(draw(questions(&[10, 20, 30, 40]), &[], &mut rng).unwrap().id);
        }
        assert_eq!(seen, HashSet::from([10, 20, 30, 40]));
    }

    #[test]
    fn unknown_previous_ids_are_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let drawn = draw(questions(&[9]), &[100, 200], &mut rng).unwrap();
        assert_eq!(drawn.id, 9);
    }
}
