// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Convention engine.
//!
//! Conventions are compiled once from configuration into a [`RuleSet`];
//! each check is a pure function of the input and one [`Convention`].

mod convention;
mod ruleset;
mod validator;

pub use convention::{Convention, Hint};
pub use ruleset::RuleSet;
pub use validator::{
    commit_header, prepare_input, validate, validate_with, CheckOptions, ValidationResult,
    EMPTY_INPUT,
};
