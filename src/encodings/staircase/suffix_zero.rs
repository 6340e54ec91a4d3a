//! # Chain Encoder for the All-Negative Suffix Windows

use super::define_and;
use crate::{
    encodings::{CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
};

/// Chain encoder for the conjunctions of negated literals behind the sliding
/// window.
///
/// Starting from the bare negation of the last input literal (which costs
/// neither a variable nor a clause), each chain step extends the represented
/// suffix by one position to the left, down to position `window`, defining one
/// auxiliary variable per step through the 3-clause AND-gate pattern. For `n`
/// input literals this allocates `n - window` auxiliary variables.
///
/// [`SuffixZeroChain::encode`] returns one representative per implication that
/// has a non-empty all-negative window, ordered by implication position:
/// entry `i` (1-based) represents `-X[window + i] & ... & -X[n]`. The final
/// implication's window is empty and has no entry.
pub struct SuffixZeroChain<'lits> {
    /// Input literals
    in_lits: &'lits [Lit],
    /// The window size
    window: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl<'lits> SuffixZeroChain<'lits> {
    /// Creates a new chain encoder over the given literals for a window size
    pub fn new(in_lits: &'lits [Lit], window: usize) -> Self {
        Self {
            in_lits,
            window,
            n_clauses: 0,
            n_vars: 0,
        }
    }

    /// Encodes the chain and returns the representative sequence
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
        if k == n {
            // the single implication has an empty all-negative window
            return Ok(vec![]);
        }
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        // chain entry at index m represents the suffix of m+1 negated
        // literals; the length-1 base case is the bare literal
        let mut prev = !self.in_lits[n - 1];
        let mut chain = Vec::with_capacity(n - k + 1);
        chain.push(prev);
        for pos in (k..n).rev() {
            let repr = var_manager.new_lit();
            define_and(collector, !self.in_lits[pos - 1], prev, repr);
            chain.push(repr);
            prev = repr;
        }

        self.n_clauses = collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;

        // implication i needs the window starting at position window + i
        Ok((1..=n - k).map(|i| chain[n - k - i]).collect())
    }
}

impl EncodeStats for SuffixZeroChain<'_> {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

#[cfg(test)]
mod tests {
    use super::SuffixZeroChain;
    use crate::{
        encodings::{EncodeStats, Error},
        instances::{BasicVarManager, Cnf, ManageVars},
        lit,
        types::Lit,
        var,
    };

    #[test]
    fn full_window_allocates_nothing() {
        let lits: Vec<Lit> = (0..4).map(Lit::positive).collect();
        let mut enc = SuffixZeroChain::new(&lits, 4);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        let reprs = enc.encode(&mut cnf, &mut vm).unwrap();
        assert!(reprs.is_empty());
        assert!(cnf.is_empty());
        assert_eq!(vm.n_used(), 4);
    }

    #[test]
    fn representatives_by_implication() {
        let lits: Vec<Lit> = (0..9).map(Lit::positive).collect();
        let mut enc = SuffixZeroChain::new(&lits, 4);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![9]);
        let reprs = enc.encode(&mut cnf, &mut vm).unwrap();
        // five implications carry an all-negative window
        assert_eq!(reprs, vec![lit![12], lit![11], lit![10], lit![9], !lit![8]]);
        assert_eq!(enc.n_vars(), 5);
        assert_eq!(enc.n_clauses(), 15);
    }

    #[test]
    fn rejects_undersized_window() {
        let lits: Vec<Lit> = (0..4).map(Lit::positive).collect();
        let mut enc = SuffixZeroChain::new(&lits, 1);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        assert_eq!(
            enc.encode(&mut cnf, &mut vm),
            Err(Error::InvalidWindowSize(1, 4))
        );
    }
}
