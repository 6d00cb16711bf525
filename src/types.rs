//! Shared result type.

/// An order of entities together with its Kemeny score.
///
/// `order[0]` is the most favored entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    /// A permutation of the governing index set.
    pub order: Vec<usize>,
    /// `K(A, order)`.
    pub score: f64,
}

impl Ranking {
    pub fn new(order: Vec<usize>, score: f64) -> Self {
        Self { order, score }
    }

    /// The empty ranking, score 0.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            score: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of `entity` in the order, if present.
    pub fn rank_of(&self, entity: usize) -> Option<usize> {
        self.order.iter().position(|&e| e == entity)
    }
}
