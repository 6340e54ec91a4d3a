//! # Staircase Encoding for Sliding-Window Block Implications
//!
//! Generates a linear-size CNF encoding for the implication family (positions
//! 1-based, window size `k`)
//!
//! ```text
//! X1          -> (X2 & ... & Xk)         & (-Xk+1 & ... & -Xn)
//! -X1 & X2    -> (X3 & ... & Xk+1)       & (-Xk+2 & ... & -Xn)
//! ...
//! -Xi-1 & Xi  -> (Xi+1 & ... & Xk+i-1)   & (-Xk+i & ... & -Xn)
//! ...
//! -Xn-k & Xn-k+1 -> (Xn-k+2 & ... & Xn)
//! ```
//!
//! Encoding each right-hand side directly would take O(n) literals per
//! implication and O(n²) overall. Instead, conjunctions of contiguous windows
//! are represented by auxiliary variables defined through 3-clause AND-gate
//! equivalences and chained so that each window extends the previous one by a
//! single literal:
//!
//! - [`SuffixZeroChain`] covers the all-negative suffixes,
//! - [`LeftOneChain`] and [`RightOneChain`] together cover the positive
//!   windows, split along sub-blocks of `k-1` positions,
//!
//! and [`Staircase`] links one representative of each family to the trigger of
//! every implication. The total encoding size is linear in `n`.
//!
//! ## References
//!
//! - G. S. Tseitin: _On the Complexity of Derivation in Propositional
//!   Calculus_, 1968.
//! - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.

use super::{atomics, CollectClauses, EncodeStats, Error};
use crate::{
    instances::ManageVars,
    types::{Clause, Lit, Var},
};

mod left_one;
mod right_one;
mod suffix_zero;

pub use left_one::LeftOneChain;
pub use right_one::RightOneChain;
pub use suffix_zero::SuffixZeroChain;

/// Emits the 3-clause AND-gate definition `out <-> (a & b)`
pub(crate) fn define_and<Col>(collector: &mut Col, a: Lit, b: Lit, out: Lit)
where
    Col: CollectClauses,
{
    collector.extend([atomics::cube_impl_lit(&[a, b], out)]);
    collector.extend(atomics::lit_impl_cube(out, &[a, b]));
}

/// Builds the clause linking the trigger of the implication at `pos` (1-based)
/// to a representative literal
fn trigger_impl(lits: &[Lit], pos: usize, repr: Lit) -> Clause {
    if pos == 1 {
        atomics::lit_impl_lit(lits[0], repr)
    } else {
        atomics::cube_impl_lit(&[!lits[pos - 2], lits[pos - 1]], repr)
    }
}

/// Emits the top-level implication clauses from the representative sequences
/// of the three chain encoders.
///
/// The all-negative sequence has no entry for the final implication and the
/// left sequence may additionally run one entry short; for every other
/// position a missing left or right representative is an error.
fn compose<Col>(
    collector: &mut Col,
    lits: &[Lit],
    window: usize,
    zero: &[Lit],
    left: &[Option<Lit>],
    right: &[Lit],
) -> Result<(), Error>
where
    Col: CollectClauses,
{
    let n_impl = lits.len() - window + 1;
    for pos in 1..=n_impl {
        if let Some(&repr) = zero.get(pos - 1) {
            collector.extend([trigger_impl(lits, pos, repr)]);
        }
        match left.get(pos - 1) {
            Some(Some(repr)) => collector.extend([trigger_impl(lits, pos, *repr)]),
            // gap where the window lines up with a full right sub-block
            Some(None) => (),
            None => {
                if pos < n_impl {
                    return Err(Error::RepresentativeMissing(pos));
                }
            }
        }
        match right.get(pos - 1) {
            Some(&repr) => collector.extend([trigger_impl(lits, pos, repr)]),
            None => return Err(Error::RepresentativeMissing(pos)),
        }
    }
    Ok(())
}

/// Encoder for the full sliding-window implication family.
///
/// Runs the three chain encoders against a shared variable manager in a fixed
/// order (all-negative suffix, left-anchored positive, right-anchored
/// positive) and links their representatives to the implication triggers. The
/// emitted CNF is equisatisfiable with the implication family over the input
/// literals.
pub struct Staircase {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The window size
    window: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Staircase {
    /// Creates a new staircase encoder over the given literals for a window
    /// size. The encoding is only valid for `2 <= window <= number of
    /// literals`; this is checked when encoding.
    pub fn new<LI: crate::types::LitIter>(lits: LI, window: usize) -> Self {
        Self {
            in_lits: lits.into_iter().collect(),
            window,
            n_clauses: 0,
            n_vars: 0,
        }
    }

    /// Gets the window size of the encoding
    pub fn window(&self) -> usize {
        self.window
    }

    /// Gets the number of input literals
    pub fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    /// Gets the number of top-level implications the encoding generates
    pub fn n_implications(&self) -> usize {
        (self.in_lits.len() + 1).saturating_sub(self.window)
    }

    /// Gets an iterator over copies of the input literals
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Lit>> {
        self.in_lits.iter().copied()
    }

    /// Computes the number of auxiliary variables the encoding will allocate
    /// for `n_lits` input literals and a window size. Returns 0 for parameter
    /// combinations that do not pass validation.
    pub fn n_aux_vars(n_lits: usize, window: usize) -> u64 {
        let (n, k) = (n_lits, window);
        if k < 2 || k > n {
            return 0;
        }
        let mut aux = (n - k) as u64;
        // each left sub-block allocates one variable less than its chain span
        let span = std::cmp::max(k - 2, 1);
        let mut start = 2;
        while start < n && start + span - 1 < n {
            aux += (span - 1) as u64;
            start += k - 1;
        }
        // right sub-blocks, with the trailing one clamped at n
        let mut start = k;
        while start <= n {
            let end = std::cmp::min(start + k - 2, n);
            aux += (end - start) as u64;
            start += k - 1;
        }
        aux
    }

    /// Encodes the implication family into the collector, drawing auxiliary
    /// variables from the variable manager. The manager's next free variable
    /// must lie beyond all input literals.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyVariableDomain`] if there are no input literals
    /// - [`Error::InvalidWindowSize`] if the window is outside `2..=n_lits`
    /// - [`Error::IndexExhaustion`] if the required auxiliary variables do not
    ///   fit below [`Var::MAX_IDX`]; checked up front, no clauses are emitted
    /// - [`Error::RepresentativeMissing`] if an implication has no
    ///   representative to link to
    pub fn encode<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        if n == 0 {
            return Err(Error::EmptyVariableDomain);
        }
        let k = self.window;
        if k < 2 || k > n {
            return Err(Error::InvalidWindowSize(k, n));
        }
        let needed = Self::n_aux_vars(n, k);
        let headroom =
            (u64::from(Var::MAX_IDX) + 1).saturating_sub(u64::from(var_manager.n_used()));
        if needed > headroom {
            return Err(Error::IndexExhaustion);
        }
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let zero = SuffixZeroChain::new(&self.in_lits, k).encode(collector, var_manager)?;
        let left = LeftOneChain::new(&self.in_lits, k).encode(collector, var_manager)?;
        let right = RightOneChain::new(&self.in_lits, k).encode(collector, var_manager)?;
        compose(collector, &self.in_lits, k, &zero, &left, &right)?;

        self.n_clauses = collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl EncodeStats for Staircase {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl Extend<Lit> for Staircase {
    fn extend<T: IntoIterator<Item = Lit>>(&mut self, iter: T) {
        self.in_lits.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::{compose, Staircase};
    use crate::{encodings::Error, instances::Cnf, lit, types::Lit};

    #[test]
    fn missing_left_representative() {
        let lits: Vec<Lit> = (0..6).map(Lit::positive).collect();
        let mut cnf = Cnf::new();
        let right = vec![lit![0]; 4];
        let res = compose(&mut cnf, &lits, 3, &[], &[], &right);
        assert_eq!(res, Err(Error::RepresentativeMissing(1)));
    }

    #[test]
    fn missing_right_representative() {
        let lits: Vec<Lit> = (0..6).map(Lit::positive).collect();
        let mut cnf = Cnf::new();
        let left = vec![Some(lit![0]); 4];
        let res = compose(&mut cnf, &lits, 3, &[], &left, &[]);
        assert_eq!(res, Err(Error::RepresentativeMissing(1)));
    }

    #[test]
    fn left_may_run_short_on_final_implication() {
        let lits: Vec<Lit> = (0..6).map(Lit::positive).collect();
        let mut cnf = Cnf::new();
        let left = vec![Some(lit![0]); 3];
        let right = vec![lit![1]; 4];
        compose(&mut cnf, &lits, 3, &[], &left, &right).unwrap();
        assert_eq!(cnf.len(), 7);
    }

    #[test]
    fn aux_var_counts() {
        assert_eq!(Staircase::n_aux_vars(9, 4), 11);
        assert_eq!(Staircase::n_aux_vars(5, 3), 3);
        assert_eq!(Staircase::n_aux_vars(5, 2), 3);
        assert_eq!(Staircase::n_aux_vars(3, 3), 0);
        assert_eq!(Staircase::n_aux_vars(2, 2), 0);
        // invalid parameters do not allocate
        assert_eq!(Staircase::n_aux_vars(5, 1), 0);
        assert_eq!(Staircase::n_aux_vars(5, 6), 0);
    }
}
