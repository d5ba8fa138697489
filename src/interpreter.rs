use crate::command::{CommandFactory, Flow};
use crate::env::Environment;
use crate::{lexer, report_error};
use anyhow::{Result, bail};
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — builtins and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The dispatcher: routes one tokenized line to a builtin or to an external
/// program and turns the result into a [`Flow`] decision for the caller.
///
/// The interpreter maintains an [`Environment`] and a list of
/// [`CommandFactory`] objects queried in order, so builtins shadow external
/// programs of the same name. Execution is strictly one command at a time.
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with the standard command set: the `cd`, `pwd`
    /// and `exit` builtins, then the external-program launcher.
    pub fn new() -> Result<Self> {
        use crate::builtin::{Cd, Exit, Pwd};
        use crate::external::ExternalCommand;
        Self::with_commands(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }

    /// Create an interpreter with a custom set of command factories.
    pub fn with_commands(commands: Vec<Box<dyn CommandFactory>>) -> Result<Self> {
        Ok(Self {
            env: Environment::new()?,
            commands,
        })
    }

    /// Execute one raw line: tokenize, dispatch, report.
    ///
    /// Builtin output goes to `stdout`. Every failure, whatever its cause,
    /// is reported by writing the fixed error literal to `stderr`; errors
    /// never halt the interpreter, only `exit` does.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let argv = lexer::split_line(line);
        match self.dispatch(&argv, stdout) {
            Ok(flow) => flow,
            Err(_) => {
                report_error(stderr);
                Flow::Continue
            }
        }
    }

    fn dispatch(&mut self, argv: &[String], stdout: &mut dyn Write) -> Result<Flow> {
        let Some((name, rest)) = argv.split_first() else {
            // An empty vector is a valid no-op.
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                return cmd.execute(stdout, &mut self.env);
            }
        }
        bail!("command not found: {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ERROR_MESSAGE;
    use crate::test_support::lock_current_dir;
    use std::env as stdenv;

    fn run(interpreter: &mut Interpreter, line: &str) -> (Flow, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = interpreter.execute_line(line, &mut out, &mut err);
        (
            flow,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn empty_and_blank_lines_are_noops() {
        let _lock = lock_current_dir();
        let mut sh = Interpreter::new().unwrap();

        for line in ["", "   ", "\t \x07 "] {
            let (flow, out, err) = run(&mut sh, line);
            assert_eq!(flow, Flow::Continue, "line {:?}", line);
            assert!(out.is_empty());
            assert!(err.is_empty());
        }
    }

    #[test]
    fn pwd_line_prints_working_directory() {
        let _lock = lock_current_dir();
        let cur = stdenv::current_dir().unwrap();
        let mut sh = Interpreter::new().unwrap();

        let (flow, out, err) = run(&mut sh, "pwd");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, format!("{}\n", cur.display()));
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_command_reports_error_and_continues() {
        let _lock = lock_current_dir();
        let mut sh = Interpreter::new().unwrap();

        let (flow, out, err) = run(&mut sh, "nonexistent_cmd_123");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert_eq!(err, ERROR_MESSAGE);

        // The loop is still usable afterwards.
        let (flow, _, err) = run(&mut sh, "pwd");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
    }

    #[test]
    fn pwd_with_argument_fails_and_prints_nothing() {
        let _lock = lock_current_dir();
        let mut sh = Interpreter::new().unwrap();

        let (flow, out, err) = run(&mut sh, "pwd extra");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert_eq!(err, ERROR_MESSAGE);
    }

    #[test]
    fn exit_halts_even_with_trailing_arguments() {
        let _lock = lock_current_dir();
        let mut sh = Interpreter::new().unwrap();

        let (flow, out, err) = run(&mut sh, "exit 1 2 3");
        assert_eq!(flow, Flow::Halt);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn cd_failure_keeps_working_directory() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let mut sh = Interpreter::new().unwrap();

        let (flow, out, err) = run(&mut sh, "cd /nonexistent-path-xyz");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert_eq!(err, ERROR_MESSAGE);
        assert_eq!(stdenv::current_dir().unwrap(), orig);

        let (_, out, _) = run(&mut sh, "pwd");
        assert_eq!(out, format!("{}\n", orig.display()));
    }

    #[test]
    fn tokenization_collapses_whitespace_before_dispatch() {
        let _lock = lock_current_dir();
        let cur = stdenv::current_dir().unwrap();
        let mut sh = Interpreter::new().unwrap();

        let (flow, out, err) = run(&mut sh, "  \t pwd \r ");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, format!("{}\n", cur.display()));
        assert!(err.is_empty());
    }
}
