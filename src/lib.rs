//! Allot
//!
//! Allot enumerates every way to draw whole-unit amounts from a set of typed
//! buckets, each bounded by a maximum, such that the amounts sum exactly to a
//! target total.
//!
//! ```rust
//! use allot::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let group = ItemGroup::new([
//!     Item::new("Apple", 1),
//!     Item::new("Banana", 2),
//!     Item::new("Cat", 3),
//! ])?;
//!
//! let result = TreeSolver::default().solve(&group, 2)?;
//!
//! assert_eq!(result.len(), 5);
//! assert!(result.solutions.iter().all(|solution| solution.total() == 2));
//! # Ok(())
//! # }
//! ```

pub mod fixtures;
pub mod items;
pub mod options;
pub mod prelude;
pub mod report;
pub mod solutions;
pub mod solvers;
pub mod tree;
pub mod utils;
