// SPDX-License-Identifier: MIT

//! Commit extraction module.

mod record;

pub use record::CommitRecord;
