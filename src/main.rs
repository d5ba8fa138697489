use mysh::{Interpreter, repl, report_error};
use std::io;
use std::path::Path;

/// Invocation modes: no arguments starts the interactive prompt, a single
/// argument names a script to run in batch mode, anything more is an error.
/// Every path, including the error ones, exits with status 0.
fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut stderr = io::stderr();

    let mut interpreter = match Interpreter::new() {
        Ok(interpreter) => interpreter,
        Err(_) => {
            report_error(&mut stderr);
            return;
        }
    };

    match args.as_slice() {
        [] => {
            if repl::interactive(&mut interpreter).is_err() {
                report_error(&mut stderr);
            }
        }
        [script] => repl::batch(
            Path::new(script),
            &mut interpreter,
            &mut io::stdout(),
            &mut stderr,
        ),
        _ => report_error(&mut stderr),
    }
}
