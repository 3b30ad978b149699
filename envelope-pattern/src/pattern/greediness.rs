/// Greediness (a.k.a. laziness / possessiveness) for quantifiers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Greediness {
    /// Grabs as many repetitions as possible, then backtracks if the rest
    /// of the pattern cannot match.
    Greedy,
    /// Starts with as few repetitions as possible, adding more only if
    /// the rest of the pattern cannot match.
    Lazy,
    /// Grabs as many repetitions as possible and never backtracks; if
    /// the rest of the pattern cannot match, the whole match fails.
    Possessive,
}

/// A `{min,max}` repetition count plus its backtracking order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Quantifier {
    pub min: usize,
    pub max: Option<usize>,
    pub mode: Greediness,
}

impl Quantifier {
    pub fn new(min: usize, max: Option<usize>, mode: Greediness) -> Self {
        Self { min, max, mode }
    }

    /// `(1, 1)` — a transparent pass-through, compiled without a `Repeat`.
    pub fn is_exactly_one(&self) -> bool {
        self.min == 1 && self.max == Some(1)
    }
}
