use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A command that is not a builtin, resolved to a concrete executable path.
///
/// The child inherits the parent's environment and standard streams; the
/// interpreter blocks until it terminates.
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

/// Exit disposition of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The child exited normally with this code.
    Exited(i32),
    /// The child was terminated by this signal.
    Signaled(i32),
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let program = resolve_program(env, Path::new(name))?;
        Some(Box::new(ExternalCommand {
            program,
            args: args.iter().map(OsString::from).collect(),
        }))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Flow> {
        // The child's own exit code never stops the interpreter; only a
        // failed launch is an error.
        launch_and_wait(&self.program, &self.args)?;
        Ok(Flow::Continue)
    }
}

/// Spawn `program` with `args` and block until it terminates.
///
/// One atomic launch-and-wait: the handle never escapes, and the child is
/// reaped before this returns. Creation and image-replacement failures both
/// surface as the `Err` branch. There is no timeout; a hung child blocks the
/// interpreter.
pub fn launch_and_wait(program: &Path, args: &[OsString]) -> Result<WaitOutcome> {
    let mut child = Command::new(program)
        .args(args)
        .spawn()
        .with_context(|| format!("can't launch {}", program.display()))?;
    // Blocks until true exit or signal termination; a stopped child does not
    // end the wait.
    let status = child
        .wait()
        .with_context(|| format!("can't wait for {}", program.display()))?;
    Ok(classify(status))
}

#[cfg(unix)]
fn classify(status: ExitStatus) -> WaitOutcome {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => WaitOutcome::Exited(code),
        None => WaitOutcome::Signaled(status.signal().unwrap_or(-1)),
    }
}

#[cfg(not(unix))]
fn classify(status: ExitStatus) -> WaitOutcome {
    WaitOutcome::Exited(status.code().unwrap_or(-1))
}

/// Resolve a command name the way `execvp` would.
///
/// A name with more than one path component (or an absolute one) is used as
/// a path and must exist. A bare name is searched across the PATH
/// directories, first match wins. An empty name or a miss resolves to
/// nothing, which the dispatcher reports as a failure.
pub fn resolve_program(env: &Environment, name: &Path) -> Option<PathBuf> {
    if name.as_os_str().is_empty() {
        return None;
    }

    if name.is_absolute() || name.components().count() > 1 {
        let candidate = if name.is_absolute() {
            name.to_path_buf()
        } else {
            env.current_dir.join(name)
        };
        return candidate.exists().then_some(candidate);
    }

    let search_paths = env.search_paths()?;
    std::env::split_paths(&search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lock_current_dir;

    fn env_at(dir: &str) -> Environment {
        Environment {
            current_dir: PathBuf::from(dir),
        }
    }

    #[test]
    #[cfg(unix)]
    fn resolves_absolute_existing_path() {
        let env = env_at("/");
        let found = resolve_program(&env, Path::new("/bin/sh")).unwrap();
        assert_eq!(found, PathBuf::from("/bin/sh"));
    }

    #[test]
    #[cfg(unix)]
    fn absolute_missing_path_is_none() {
        let env = env_at("/");
        assert!(resolve_program(&env, Path::new("/bin/nonexisting-xyz")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn bare_name_is_searched_in_path() {
        let _lock = lock_current_dir();
        let env = Environment::new().unwrap();
        let found = resolve_program(&env, Path::new("sh")).expect("sh must be on PATH");
        assert!(found.ends_with("sh"));
        assert!(found.is_absolute());
    }

    #[test]
    fn unknown_bare_name_is_none() {
        let _lock = lock_current_dir();
        let env = Environment::new().unwrap();
        assert!(resolve_program(&env, Path::new("nonexistent_cmd_123")).is_none());
    }

    #[test]
    fn empty_name_is_none() {
        let env = env_at("/");
        assert!(resolve_program(&env, Path::new("")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn wait_reports_exit_code() {
        let args = [OsString::from("-c"), OsString::from("exit 7")];
        let outcome = launch_and_wait(Path::new("/bin/sh"), &args).unwrap();
        assert_eq!(outcome, WaitOutcome::Exited(7));
    }

    #[test]
    #[cfg(unix)]
    fn wait_reports_signal_termination() {
        let args = [OsString::from("-c"), OsString::from("kill -KILL $$")];
        let outcome = launch_and_wait(Path::new("/bin/sh"), &args).unwrap();
        assert_eq!(outcome, WaitOutcome::Signaled(9));
    }

    #[test]
    fn launch_of_missing_program_fails() {
        let res = launch_and_wait(Path::new("/definitely/not/a/program"), &[]);
        assert!(res.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn external_command_always_continues() {
        let _lock = lock_current_dir();
        let mut env = Environment::new().unwrap();
        let cmd = Box::new(ExternalCommand {
            program: PathBuf::from("/bin/sh"),
            args: vec![OsString::from("-c"), OsString::from("exit 3")],
        });
        let flow = cmd.execute(&mut Vec::<u8>::new(), &mut env).unwrap();
        assert_eq!(flow, Flow::Continue);
    }
}
