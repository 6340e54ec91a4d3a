//! # Left Chain Encoder for the Positive Window Sub-Blocks

use super::define_and;
use crate::{
    encodings::{CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
};

/// Chain encoder for the right-anchored conjunctions of the positive region.
///
/// The region from position 2 through `n-1` is covered in strides of
/// `window - 1` positions. Each stride carries a chain span of `window - 2`
/// positions anchored at the span's last position: the base case is that bare
/// literal, and every auxiliary extends the conjunction one position to the
/// left. Per sub-block the entries are ordered longest window first, and a
/// `None` gap entry keeps the sequence aligned with the implication positions
/// across the remainder of the stride.
///
/// A sub-block whose chain span collapses to a single position (window size 3,
/// or window size 2 where the stride itself is a single position) contributes
/// its bare literal; no gap entries are emitted for single-position strides.
/// Sub-blocks that do not fit before position `n` are not built, so the
/// returned sequence can be one entry short of the number of implications;
/// only the final implication tolerates the missing entry.
pub struct LeftOneChain<'lits> {
    /// Input literals
    in_lits: &'lits [Lit],
    /// The window size
    window: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl<'lits> LeftOneChain<'lits> {
    /// Creates a new chain encoder over the given literals for a window size
    pub fn new(in_lits: &'lits [Lit], window: usize) -> Self {
        Self {
            in_lits,
            window,
            n_clauses: 0,
            n_vars: 0,
        }
    }

    /// Encodes the chains and returns the representative sequence
    pub fn encode<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<Vec<Option<Lit>>, Error>
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
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let span = std::cmp::max(k - 2, 1);
        let mut reprs = Vec::new();
        let mut start = 2;
        while start < n && start + span - 1 < n {
            let end = start + span - 1;
            // chain anchored at the last position, growing leftward
            let mut prev = self.in_lits[end - 1];
            let mut block = Vec::with_capacity(span);
            block.push(prev);
            for pos in (start..end).rev() {
                let repr = var_manager.new_lit();
                define_and(collector, self.in_lits[pos - 1], prev, repr);
                block.push(repr);
                prev = repr;
            }
            // longest window first to line up with the implication order
            reprs.extend(block.into_iter().rev().map(Some));
            start += k - 1;
            if span < k - 1 && start < n && start + span - 1 < n {
                reprs.push(None);
            }
        }

        self.n_clauses = collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(reprs)
    }
}

impl EncodeStats for LeftOneChain<'_> {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}
