// SPDX-License-Identifier: MIT

//! Release document rendering.
//!
//! Formats a completed [`crate::release::ReleaseAggregate`] as AsciiDoc.

mod document;

pub use document::{ReleaseDocument, SectionBodies};
