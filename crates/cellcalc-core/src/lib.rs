//! # cellcalc-core
//!
//! Core data structures for the cellcalc recalculation engine.
//!
//! This crate provides:
//! - [`DependencyGraph`] - Mirrored dependents/dependees bookkeeping between cells
//! - [`CellStore`] - Cell contents and cached values, keyed by cell name
//! - [`CellContents`] and [`CellValue`] - What a cell holds and what it evaluates to
//! - [`NameValidator`] - Cell-name syntax checks
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_core::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_dependency("A1", "B1").unwrap();
//! graph.add_dependency("B1", "C1").unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.recalc_order("A1").unwrap(), vec!["A1", "B1", "C1"]);
//! ```

pub mod cell;
pub mod dependency;
pub mod error;
pub mod name;
pub mod store;

pub use cell::{CellContents, CellValue};
pub use dependency::DependencyGraph;
pub use error::{Error, Result};
pub use name::NameValidator;
pub use store::{Cell, CellStore};
