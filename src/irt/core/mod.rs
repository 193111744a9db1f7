//! irt::core: capabilities, options and state shared by 3PL models.
//!
//! Purpose
//! -------
//! Everything a 3PL model needs besides the math itself: the experiment and
//! condition capability traits with an owned carrier ([`data`]), estimation
//! options ([`options`]), fitted parameters and fit state ([`params`]), and
//! the validation rules shared by Rust and Python entry points
//! ([`validation`]).
//!
//! Conventions
//! -----------
//! - Optimizer-space parameters are `[discrimination, logit_base_rate]`.
//! - Conditions are 0-based and ordered; the model pairs condition `i` with
//!   default difficulty `i` and ignores conditions past the fifth.
//! - Errors are `ThreePLError`; nothing in this module panics on bad input.

pub mod data;
pub mod options;
pub mod params;
pub mod validation;
