//! # stairsat - Staircase Encodings for Sliding-Window Block Implications
//!
//! `stairsat` generates linear-size CNF encodings for chains of implications of
//! the form "if the window starts at position `i`, the next `k-1` variables are
//! true and everything behind the window is false". The generated clauses are
//! plain [`types::Clause`]s collected into any [`encodings::CollectClauses`]
//! implementor and can be written as DIMACS CNF for consumption by a SAT
//! solver.
//!
//! ## Example
//!
//! ```
//! use stairsat::{
//!     encodings::{staircase::Staircase, EncodeStats},
//!     instances::{BasicVarManager, Cnf},
//!     types::Lit,
//!     var,
//! };
//!
//! let lits: Vec<Lit> = (0..9).map(Lit::positive).collect();
//! let mut enc = Staircase::new(lits, 4);
//! let mut cnf = Cnf::new();
//! let mut var_manager = BasicVarManager::from_next_free(var![9]);
//! enc.encode(&mut cnf, &mut var_manager).unwrap();
//! assert_eq!(enc.n_vars(), 11);
//! ```

pub mod encodings;
pub mod instances;
pub mod types;
