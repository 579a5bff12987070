use std::fmt;
use std::ops::AddAssign;

use crate::token::TokenSequence;

/// Count of tokens whose predicted label matches the gold label.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    /// Compare position by position. Every predicted token counts toward the
    /// total; it is correct when it carries a label equal to its gold
    /// counterpart's.
    pub fn compare<P, G>(predicted: &P, gold: &G) -> Self
    where
        P: TokenSequence + ?Sized,
        G: TokenSequence + ?Sized,
    {
        let total = predicted.len();
        let correct = (0..total)
            .filter(|&i| match (predicted.token(i), gold.token(i)) {
                (Some(p), Some(g)) => p.semantic().is_some() && p.semantic() == g.semantic(),
                _ => false,
            })
            .count();
        Self { correct, total }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl AddAssign for Accuracy {
    fn add_assign(&mut self, other: Self) {
        self.correct += other.correct;
        self.total += other.total;
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.2}%)", self.correct, self.total, self.ratio() * 100.0)
    }
}
