//! Majority vote over ranked neighbors.

use std::collections::HashMap;

use crate::common_types::Class;

/// Picks the most frequent label among `ranked_labels`, which must be ordered
/// nearest neighbor first.
///
/// A tie on vote count goes to the tied label whose nearest neighbor ranks
/// earliest: the smallest distance, then the smallest training index, since
/// that is the order neighbors are ranked in. Returns `None` for no labels.
pub fn majority_vote<'a, I>(ranked_labels: I) -> Option<&'a Class>
where
    I: IntoIterator<Item = &'a Class>,
{
    // label -> (votes, rank of its nearest neighbor)
    let mut tally: HashMap<&Class, (usize, usize)> = HashMap::new();
    for (rank, label) in ranked_labels.into_iter().enumerate() {
        tally.entry(label).or_insert((0, rank)).0 += 1;
    }

    tally
        .into_iter()
        .min_by(|(_, (votes_a, rank_a)), (_, (votes_b, rank_b))| {
            votes_b.cmp(votes_a).then_with(|| rank_a.cmp(rank_b))
        })
        .map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<Class> {
        names.iter().map(|&name| Class::from(name)).collect()
    }

    #[test]
    fn test_clear_majority_wins() {
        let ranked = labels(&["B", "A", "A"]);
        assert_eq!(majority_vote(&ranked), Some(&Class::from("A")));
    }

    #[test]
    fn test_tie_goes_to_nearest_label() {
        let ranked = labels(&["B", "A", "A", "B", "C"]);
        assert_eq!(majority_vote(&ranked), Some(&Class::from("B")));

        let ranked = labels(&["C", "A", "B", "A", "B"]);
        assert_eq!(majority_vote(&ranked), Some(&Class::from("A")));
    }

    #[test]
    fn test_single_neighbor() {
        let ranked = vec![Class::Integer(3)];
        assert_eq!(majority_vote(&ranked), Some(&Class::Integer(3)));
    }

    #[test]
    fn test_no_labels() {
        let ranked: Vec<Class> = Vec::new();
        assert_eq!(majority_vote(&ranked), None);
    }
}
