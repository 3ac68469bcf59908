#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Command sources for procpool
//!
//! The pool accepts commands one at a time and does not care where they
//! come from. This crate builds command lists the usual ways: one command
//! per line from a file or stdin, or a template applied to every file that
//! matches a set of glob patterns.

pub mod lines;
pub mod patterns;
pub mod template;

pub use lines::{read_command_file, read_command_lines};
pub use patterns::expand_patterns;
pub use template::{shell_quote, CommandTemplate};
