use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result, bail};
use argh::{EarlyExit, FromArgs};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed with [`argh`] (`FromArgs`) and executed directly
/// in-process; they never spawn a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "pwd".
    fn name() -> &'static str;

    /// Executes the command against the provided output stream and environment.
    ///
    /// An `Err` return means the command failed; the caller reports it.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow> {
        T::execute(*self, stdout, env)
    }
}

/// Stand-in for a builtin whose arguments failed to parse.
///
/// An arity violation must not touch any state, so the rejection is deferred
/// to execution time and surfaces as a plain error there.
struct RejectedArgs;

impl ExecutableCommand for RejectedArgs {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        bail!("invalid arguments")
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        Some(match T::from_args(&[name], args) {
            Ok(cmd) => Box::new(cmd),
            // Help requests get no special treatment: anything argh cannot
            // turn into the command counts as an argument error.
            Err(EarlyExit { .. }) => Box::new(RejectedArgs),
        })
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow> {
        writeln!(stdout, "{}", env.current_dir.display())?;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
/// With no target, changes to the directory named by HOME.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current
    /// directory. Defaults to $HOME when omitted.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow> {
        let target = match self.target {
            Some(t) => PathBuf::from(t),
            None => env.home().context("cd: HOME not set")?,
        };

        let absolute = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        // Canonicalize first so a missing or inaccessible target fails
        // before the working directory is touched.
        let canonical = fs::canonicalize(&absolute)
            .with_context(|| format!("cd: can't resolve {}", absolute.display()))?;

        std::env::set_current_dir(&canonical)
            .with_context(|| format!("cd: can't chdir to {}", canonical.display()))?;
        env.current_dir = canonical;
        Ok(Flow::Continue)
    }
}

/// Stop the interpreter.
///
/// The only builtin that halts the loop. Arguments, flag-shaped or not, are
/// ignored entirely, so it bypasses argument parsing and gets its own
/// factory.
pub struct Exit;

impl CommandFactory for Factory<Exit> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        _args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        (name == "exit").then(|| Box::new(Exit) as Box<dyn ExecutableCommand>)
    }
}

impl ExecutableCommand for Exit {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        Ok(Flow::Halt)
    }
}
