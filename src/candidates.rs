use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::{Candidate, Direction};

/// Enumerate every candidate, in all eight directions, where a word of `length` fits entirely on
/// a `rows` x `cols` board. Candidates are grouped by direction in `Direction::ALL` order and
/// listed row-major within each direction.
pub fn generate_candidates(rows: usize, cols: usize, length: usize) -> Vec<Candidate> {
    if length == 0 || (length > rows && length > cols) {
        return vec![];
    }

    let mut result = Vec::new();
    for direction in Direction::ALL {
        result.extend(generate_candidates_for_direction(rows, cols, length, direction));
    }
    result
}

/// Enumerate the anchors for a single direction. A word running "backwards" along an axis has
/// to start at least `length - 1` cells in from the near edge, so those anchors are shifted.
pub fn generate_candidates_for_direction(
    rows: usize,
    cols: usize,
    length: usize,
    direction: Direction,
) -> Vec<Candidate> {
    if length == 0 {
        return vec![];
    }

    let (row_step, col_step) = direction.step();

    // Number of anchor positions along each axis, and where they start.
    let (row_count, row_offset) = match row_step {
        0 => (rows, 0),
        _ if length > rows => return vec![],
        -1 => (rows - length + 1, length - 1),
        _ => (rows - length + 1, 0),
    };
    let (col_count, col_offset) = match col_step {
        0 => (cols, 0),
        _ if length > cols => return vec![],
        -1 => (cols - length + 1, length - 1),
        _ => (cols - length + 1, 0),
    };

    let mut result = Vec::with_capacity(row_count * col_count);
    for row in row_offset..row_offset + row_count {
        for col in col_offset..col_offset + col_count {
            result.push(Candidate::new(row, col, direction));
        }
    }
    result
}

/// A collection of candidates indexed by direction and word length.
///
/// The placement pool gets pruned as words are committed, so the invariant it keeps is only
/// structural: nothing left in it is intercepted by a committed word on the same axis. Letter
/// conflicts still have to be checked against the board when a candidate is used. Duplicate
/// detection uses a separate, never-pruned pool.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    rows: usize,
    cols: usize,

    /// `buckets[direction][length]`; lengths run from 0 to the longer board dimension.
    buckets: Vec<Vec<Vec<Candidate>>>,
}

impl CandidatePool {
    /// Build an unshuffled pool covering every word length that could fit on the board.
    pub fn new(rows: usize, cols: usize) -> CandidatePool {
        let max_length = rows.max(cols);

        let buckets = Direction::ALL
            .iter()
            .map(|&direction| {
                (0..=max_length)
                    .map(|length| generate_candidates_for_direction(rows, cols, length, direction))
                    .collect()
            })
            .collect();

        CandidatePool { rows, cols, buckets }
    }

    /// Build a pool whose buckets have each been shuffled once, so that a linear scan of a bucket
    /// visits positions in random order.
    pub fn shuffled<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> CandidatePool {
        let mut pool = CandidatePool::new(rows, cols);
        for direction_buckets in &mut pool.buckets {
            for bucket in direction_buckets {
                bucket.shuffle(rng);
            }
        }
        pool
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The live candidates for the given direction and word length. Lengths that can't fit on
    /// the board have an empty bucket.
    pub fn bucket(&self, direction: Direction, length: usize) -> &[Candidate] {
        self.buckets[direction.index()].get(length).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn shuffle_bucket<R: Rng + ?Sized>(&mut self, direction: Direction, length: usize, rng: &mut R) {
        if let Some(bucket) = self.buckets[direction.index()].get_mut(length) {
            bucket.shuffle(rng);
        }
    }

    /// All live candidates for a word length, across every direction.
    pub fn for_length(&self, length: usize) -> impl Iterator<Item = &Candidate> + '_ {
        Direction::ALL.into_iter().flat_map(move |direction| self.bucket(direction, length).iter())
    }

    /// Total number of live candidates across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// After committing `committed` for a word of `committed_length`, drop every candidate on
    /// the same axis (same or opposite direction, any length) that it intercepts.
    pub fn remove_intercepting(&mut self, committed: &Candidate, committed_length: usize) {
        for direction in [committed.direction, committed.direction.opposite()] {
            for (length, bucket) in self.buckets[direction.index()].iter_mut().enumerate() {
                bucket.retain(|candidate| !committed.intercepts(committed_length, candidate, length));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn count_for(candidates: &[Candidate], direction: Direction) -> usize {
        candidates.iter().filter(|c| c.direction == direction).count()
    }

    #[test]
    fn test_generate_candidate_counts() {
        let (rows, cols, length) = (6, 8, 3);
        let candidates = generate_candidates(rows, cols, length);

        for direction in Direction::ALL {
            let expected = match direction {
                Direction::Up | Direction::Down => (rows - length + 1) * cols,
                Direction::Left | Direction::Right => rows * (cols - length + 1),
                _ => (rows - length + 1) * (cols - length + 1),
            };
            assert_eq!(count_for(&candidates, direction), expected, "{:?}", direction);
        }
    }

    #[test]
    fn test_generated_candidates_stay_on_board() {
        let (rows, cols) = (5, 7);
        for length in 1..=7 {
            for candidate in generate_candidates(rows, cols, length) {
                let (end_row, end_col) = candidate.endpoint(length);
                assert!(end_row >= 0 && end_row < rows as isize, "{:?} len {}", candidate, length);
                assert!(end_col >= 0 && end_col < cols as isize, "{:?} len {}", candidate, length);
            }
        }
    }

    #[test]
    fn test_long_words_only_fit_along_the_long_axis() {
        let candidates = generate_candidates(3, 6, 5);

        assert_eq!(count_for(&candidates, Direction::Right), 3 * 2);
        assert_eq!(count_for(&candidates, Direction::Left), 3 * 2);
        assert_eq!(count_for(&candidates, Direction::Up), 0);
        assert_eq!(count_for(&candidates, Direction::DownRight), 0);

        assert!(generate_candidates(3, 6, 7).is_empty());
        assert!(generate_candidates(3, 6, 0).is_empty());
    }

    #[test]
    fn test_backwards_anchors_are_offset() {
        let up: HashSet<_> = generate_candidates_for_direction(4, 4, 3, Direction::Up)
            .into_iter().map(|c| (c.row, c.col)).collect();

        assert!(up.contains(&(2, 0)));
        assert!(up.contains(&(3, 3)));
        assert!(!up.contains(&(1, 0)));
    }

    #[test]
    fn test_shuffled_pool_keeps_the_same_candidates() {
        let mut rng = StdRng::seed_from_u64(7);
        let plain = CandidatePool::new(5, 5);
        let shuffled = CandidatePool::shuffled(5, 5, &mut rng);

        assert_eq!(plain.len(), shuffled.len());
        for direction in Direction::ALL {
            for length in 0..=5 {
                let a: HashSet<_> = plain.bucket(direction, length).iter().collect();
                let b: HashSet<_> = shuffled.bucket(direction, length).iter().collect();
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_out_of_range_bucket_is_empty() {
        let pool = CandidatePool::new(4, 4);
        assert!(pool.bucket(Direction::Right, 5).is_empty());
        assert!(pool.bucket(Direction::Right, 40).is_empty());
        assert_eq!(pool.for_length(40).count(), 0);
    }

    #[test]
    fn test_remove_intercepting_only_touches_the_committed_axis() {
        let mut pool = CandidatePool::new(5, 5);
        let before = pool.clone();
        let committed = Candidate::new(2, 0, Direction::Right);

        pool.remove_intercepting(&committed, 4);

        // Nothing remaining on the axis is intercepted by the committed word.
        for direction in [Direction::Right, Direction::Left] {
            for length in 0..=5 {
                for candidate in pool.bucket(direction, length) {
                    assert!(!committed.intercepts(4, candidate, length));
                }
            }
        }

        // The rest of row 2 is gone for horizontal words of length 3.
        assert!(!pool.bucket(Direction::Right, 3).contains(&Candidate::new(2, 1, Direction::Right)));
        assert!(!pool.bucket(Direction::Left, 3).contains(&Candidate::new(2, 4, Direction::Left)));
        assert!(pool.bucket(Direction::Right, 3).contains(&Candidate::new(1, 1, Direction::Right)));

        for direction in Direction::ALL {
            if direction == Direction::Right || direction == Direction::Left {
                continue;
            }
            for length in 0..=5 {
                assert_eq!(pool.bucket(direction, length), before.bucket(direction, length));
            }
        }
    }
}
