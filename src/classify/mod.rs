// SPDX-License-Identifier: MIT

//! Commit classification module.
//!
//! Buckets commits by issue type, tags security-relevant work, and provides
//! the merge/dedup primitives the aggregator and renderer build on.

mod category;
mod classifier;
mod report;

pub use category::Category;
pub use classifier::classify;
pub use report::{dedup_by_hash, CategoryReport};
