// SPDX-License-Identifier: MIT

//! Command-line interface.

mod args;
mod dispatch;

pub use args::Cli;
pub use dispatch::run;
