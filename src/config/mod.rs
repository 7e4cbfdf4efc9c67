// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for convcheck.
//!
//! This module handles locating, parsing, and merging convention
//! definitions from convcheck.toml with the built-in defaults.

pub mod default;
mod loader;
mod schema;

pub use default::builtin_conventions;
pub use loader::{
    effective_conventions, find_config_file, find_config_file_from, merge_conventions,
    parse_config, CONFIG_FILES,
};
pub use schema::*;
