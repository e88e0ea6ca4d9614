//! Shared test utilities for the folder-mirror workspace.
//!
//! This crate provides standardised directory-tree fixtures so the crate
//! test suites do not each grow their own. It is a dev-dependency only and
//! never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder plus listing and mirror assertions

pub mod tree;

pub use tree::{Node, TestTree, assert_mirrors, list_tree};
