//! Shapeforge - build, inspect and invoke runtime service contracts
//!
//! Command-line front end over `shapeforge-core` contract files.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod cli;
