//! Shift-reduce oracles for transition-based constituency parsing.
//!
//! Turns treebank trees into the action sequences that build them (and back),
//! and collects the word, tag, nonterminal and action vocabularies of a corpus.
//!
//! ```
//! use rnng_oracle::{DiscOracle, Oracle, SynTree};
//!
//! let tree: SynTree = "(S (NP (NNP John)) (VP (VBZ sleeps)))".parse().unwrap();
//! let oracle = DiscOracle::from_tree(&tree);
//!
//! assert_eq!(
//!   oracle.to_text(),
//!   "John sleeps\nNNP VBZ\nNT(S)\nNT(NP)\nSHIFT\nREDUCE\nNT(VP)\nSHIFT\nREDUCE\nREDUCE"
//! );
//! assert_eq!(oracle.to_text().parse::<DiscOracle>().unwrap(), oracle);
//! ```

#[macro_use]
extern crate lazy_static;

#[macro_use]
pub mod utils;

pub mod action;
pub mod dataset;
pub mod error;
pub mod itemstore;
pub mod oracle;
pub mod parse_tree;
pub mod syntree;

pub use crate::action::{Action, ActionKey};
pub use crate::dataset::{EncodedOracle, OracleDataset};
pub use crate::error::{LookupError, OracleError, ParseActionError};
pub use crate::itemstore::ItemStore;
pub use crate::oracle::{DiscOracle, GenOracle, Oracle};
pub use crate::parse_tree::read_trees;
pub use crate::syntree::{Constituent, SynTree, Word};
pub use crate::utils::Err;
