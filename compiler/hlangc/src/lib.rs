//! HLang driver library.
//!
//! The pipeline itself lives in the `hlang_*` crates; this crate only wires
//! them together behind the `hlang` binary's subcommands.

pub mod commands;
