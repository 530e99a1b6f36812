//! # Forgelink CLI Library
//!
//! Command definitions, client construction and output helpers for the
//! `forgelink` binary.

pub mod cli;
pub mod clients;
pub mod output;
