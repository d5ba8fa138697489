use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// What the interpreter loop should do after a dispatch.
///
/// Every executed line produces one of these. [`Flow::Halt`] is the
/// distinguished termination signal: only the `exit` builtin produces it,
/// and the line source stops iterating as soon as it sees one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading lines.
    Continue,
    /// Stop the interpreter; the process then exits successfully.
    Halt,
}

/// Object-safe trait for anything the interpreter can execute.
///
/// Implemented by built-ins via a blanket impl and by external commands.
/// Builtins write their output to `stdout`; external commands inherit the
/// real standard streams. An `Err` return means the command failed and the
/// caller reports it through the single fixed error channel.
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. Lookup is a
/// case-sensitive exact match; implementations can use the environment to
/// resolve executables (e.g., via PATH).
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
