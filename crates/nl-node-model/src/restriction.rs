//! The most restricting outgoing link found in one iteration.

use nl_core::Real;

/// Outcome of scanning the outgoing links for the binding constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Restriction {
    /// Outgoing link `index` has the smallest restriction factor `factor`.
    Binding { factor: Real, index: usize },
    /// No outgoing link receives any remaining scaled flow; the unresolved
    /// incoming links are resolved together.
    NoRestriction,
}

impl Restriction {
    /// Keep `self` unless `(factor, index)` is strictly smaller. Callers scan in
    /// ascending index order, so ties stay with the lowest index.
    pub(crate) fn tighten(self, factor: Real, index: usize) -> Self {
        match self {
            Restriction::Binding { factor: best, .. } if best <= factor => self,
            _ => Restriction::Binding { factor, index },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tighten_keeps_first_minimum() {
        let r = Restriction::NoRestriction
            .tighten(0.8, 0)
            .tighten(0.5, 1)
            .tighten(0.5, 2)
            .tighten(0.9, 3);
        assert_eq!(
            r,
            Restriction::Binding {
                factor: 0.5,
                index: 1
            }
        );
    }
}
