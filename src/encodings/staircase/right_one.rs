//! # Right Chain Encoder for the Positive Window Sub-Blocks

use super::define_and;
use crate::{
    encodings::{CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
};

/// Chain encoder for the left-anchored conjunctions of the positive region.
///
/// The region is covered in sub-blocks of `window - 1` positions starting at
/// offset `window`. Each sub-block's chain is anchored at its first position
/// (the bare literal) and grows one position to the right per auxiliary, so
/// the entries per sub-block are ordered shortest window first, matching the
/// implication order. The final sub-block may be shorter than `window - 1`
/// positions; its chain is built over exactly the remaining positions through
/// `n`. The returned sequence always has one entry per implication.
pub struct RightOneChain<'lits> {
    /// Input literals
    in_lits: &'lits [Lit],
    /// The window size
    window: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl<'lits> RightOneChain<'lits> {
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
    ) -> Result<Vec<Lit>, Error>
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

        let mut reprs = Vec::with_capacity(n - k + 2);
        let mut start = k;
        while start <= n {
            // the final sub-block may be shorter than window - 1 positions
            let end = std::cmp::min(start + k - 2, n);
            let mut prev = self.in_lits[start - 1];
            reprs.push(prev);
            for pos in start + 1..=end {
                let repr = var_manager.new_lit();
                define_and(collector, self.in_lits[pos - 1], prev, repr);
                reprs.push(repr);
                prev = repr;
            }
            start += k - 1;
        }

        self.n_clauses = collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(reprs)
    }
}

impl EncodeStats for RightOneChain<'_> {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

#[cfg(test)]
mod tests {
    use super::RightOneChain;
    use crate::{
        encodings::EncodeStats,
        instances::{BasicVarManager, Cnf, ManageVars},
        lit,
        types::Lit,
        var,
    };

    #[test]
    fn full_sub_blocks() {
        let lits: Vec<Lit> = (0..9).map(Lit::positive).collect();
        let mut enc = RightOneChain::new(&lits, 4);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![9]);
        let reprs = enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(
            reprs,
            vec![lit![3], lit![9], lit![10], lit![6], lit![11], lit![12]]
        );
        assert_eq!(enc.n_vars(), 4);
        assert_eq!(enc.n_clauses(), 12);
    }

    #[test]
    fn short_trailing_sub_block() {
        let lits: Vec<Lit> = (0..11).map(Lit::positive).collect();
        let mut enc = RightOneChain::new(&lits, 4);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![11]);
        let reprs = enc.encode(&mut cnf, &mut vm).unwrap();
        // one entry per implication, the trailing block covers positions 10
        // and 11 only
        assert_eq!(reprs.len(), 8);
        assert_eq!(reprs[6], lit![9]);
        assert_eq!(reprs[7], lit![15]);
        assert_eq!(enc.n_vars(), 5);
    }

    #[test]
    fn unit_window_is_all_bare_literals() {
        let lits: Vec<Lit> = (0..5).map(Lit::positive).collect();
        let mut enc = RightOneChain::new(&lits, 2);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![5]);
        let reprs = enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(reprs, vec![lit![1], lit![2], lit![3], lit![4]]);
        assert!(cnf.is_empty());
        assert_eq!(vm.n_used(), 5);
    }

    #[test]
    fn full_window_single_entry() {
        let lits: Vec<Lit> = (0..3).map(Lit::positive).collect();
        let mut enc = RightOneChain::new(&lits, 3);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        let reprs = enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(reprs, vec![lit![2]]);
        assert!(cnf.is_empty());
    }
}
