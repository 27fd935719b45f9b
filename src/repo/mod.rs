// SPDX-License-Identifier: MIT

//! Repository commit extraction module.
//!
//! Wraps a local mirror and computes the cherry-pick-aware "new but not
//! previous" commit set plus the people behind it.

mod contributors;
mod source;

pub use contributors::{contributors, Contributors};
pub use source::RepoSource;
