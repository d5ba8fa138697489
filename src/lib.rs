//! A tiny command interpreter.
//!
//! This crate provides the building blocks of a minimal shell: a whitespace
//! tokenizer, a small set of built-in commands executed in-process, and a
//! launcher that runs anything else as an external program and blocks until
//! it finishes. The interpreter runs one command at a time; there are no
//! pipelines, redirections or background jobs.
//!
//! The main entry point is [`Interpreter`], which executes one command line
//! at a time using a set of pluggable factories. The [`repl`] module wraps it
//! in an interactive prompt loop and a batch-file runner.

use std::io::Write;

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
pub mod lexer;
pub mod repl;

pub use command::Flow;
pub use interpreter::Interpreter;

/// The one and only error message.
///
/// Every failure, whatever its cause, is reported by writing exactly this
/// text to standard error. No errno, path or usage text ever reaches the
/// terminal.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Write the fixed error literal to `stderr`.
///
/// Write failures on the error stream itself are swallowed; there is nowhere
/// left to report them.
pub fn report_error(stderr: &mut dyn Write) {
    let _ = stderr.write_all(ERROR_MESSAGE.as_bytes());
}
