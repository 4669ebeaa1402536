use rand::Rng;
use rand::seq::SliceRandom;

/// A permutation of deck indices drawn once and walked with a cursor.
///
/// The permutation is never redrawn: once the cursor runs off the end the
/// next pop starts over from the same order.
#[derive(Debug, Clone)]
pub struct ShuffleOrder {
    order: Vec<usize>,
    cursor: usize,
}

impl ShuffleOrder {
    pub fn new<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// True once every index of the current traversal has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn pop(&mut self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        if self.is_exhausted() {
            self.cursor = 0;
        }
        let id = self.order[self.cursor];
        self.cursor += 1;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn one_traversal_visits_every_index_once() {
        let mut order = ShuffleOrder::new(12, &mut StdRng::seed_from_u64(5));
        let mut seen: Vec<usize> = (0..12).map(|_| order.pop().unwrap()).collect();
        assert!(order.is_exhausted());
        seen.sort();
        assert_eq!(seen, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn wrapping_reuses_the_same_permutation() {
        let mut order = ShuffleOrder::new(6, &mut StdRng::seed_from_u64(6));
        let first: Vec<usize> = (0..6).map(|_| order.pop().unwrap()).collect();
        let second: Vec<usize> = (0..6).map(|_| order.pop().unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first, order.as_slice());
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut order = ShuffleOrder::new(3, &mut StdRng::seed_from_u64(7));
        for _ in 0..10 {
            order.pop();
            assert!(order.cursor() <= order.len());
        }
        order.rewind();
        assert_eq!(order.cursor(), 0);
    }

    #[test]
    fn empty_order_pops_nothing() {
        let mut order = ShuffleOrder::new(0, &mut StdRng::seed_from_u64(8));
        assert!(order.is_empty());
        assert!(order.is_exhausted());
        assert_eq!(order.pop(), None);
        assert_eq!(order.cursor(), 0);
    }
}
