//! Line sources feeding the interpreter: the interactive prompt loop and the
//! batch-file runner.

use crate::command::Flow;
use crate::{Interpreter, report_error};
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Prompt printed before every interactive line.
pub const PROMPT: &str = "mysh> ";

/// Lines at or beyond this byte length are rejected without being tokenized.
pub const MAX_LINE_LEN: usize = 512;

/// Interactive mode: prompt, read one line, execute, repeat.
///
/// Stops on `exit`, end of input, or an interrupt. Over-long lines are
/// reported and skipped; the loop keeps going.
pub fn interactive(interpreter: &mut Interpreter) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let mut stdout = io::stdout();
                let mut stderr = io::stderr();
                if run_one(interpreter, &line, &mut stdout, &mut stderr) == Flow::Halt {
                    break;
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Batch mode: run every line of the script at `path`.
///
/// Each raw line is echoed to `stdout` before it is executed. A script that
/// cannot be opened is reported as a failure and skipped entirely. A halt
/// stops the run without echoing or executing the remaining lines.
pub fn batch(
    path: &Path,
    interpreter: &mut Interpreter,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            report_error(stderr);
            return;
        }
    };
    run_lines(BufReader::new(file), interpreter, stdout, stderr);
}

fn run_lines(
    reader: impl BufRead,
    interpreter: &mut Interpreter,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => {
                report_error(stderr);
                return;
            }
        };
        let _ = writeln!(stdout, "{line}");
        if run_one(interpreter, &line, stdout, stderr) == Flow::Halt {
            return;
        }
    }
}

/// Length-check one raw line, then hand it to the interpreter.
fn run_one(
    interpreter: &mut Interpreter,
    line: &str,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Flow {
    if line.len() >= MAX_LINE_LEN {
        report_error(stderr);
        return Flow::Continue;
    }
    interpreter.execute_line(line, stdout, stderr)
}
