//! # CNF Encodings
//!
//! CNF encodings turning structured constraints into clauses. The main
//! encoding in this library is the [`staircase`] encoding for sliding-window
//! block implications.

use thiserror::Error;

pub mod atomics;
pub mod staircase;

/// Trait for collecting clauses. Mainly used when generating encodings and
/// implemented by [`crate::instances::Cnf`] and
/// [`crate::instances::SatInstance`].
pub trait CollectClauses: Extend<crate::types::Clause> {
    /// Gets the number of clauses in the collection
    fn n_clauses(&self) -> usize;
}

/// Errors from encodings
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The window size is outside of the valid range for the given number of
    /// input literals. Contains the requested window size and the number of
    /// input literals.
    #[error("window size {0} is invalid for {1} input literals")]
    InvalidWindowSize(usize, usize),
    /// There are no input literals to encode over
    #[error("no input literals to encode over")]
    EmptyVariableDomain,
    /// An implication position has no representative to link to.
    /// Contains the 1-based implication position.
    #[error("no representative for implication position {0}")]
    RepresentativeMissing(usize),
    /// Allocating the required auxiliary variables would exceed the maximum
    /// representable variable index
    #[error("auxiliary variable allocation would exceed the maximum variable index")]
    IndexExhaustion,
}

/// Trait for encodings that track statistics.
pub trait EncodeStats {
    /// Gets the number of clauses in the encoding
    fn n_clauses(&self) -> usize;

    /// Gets the number of variables in the encoding
    fn n_vars(&self) -> u32;
}
