//! `vguard exec <program> [args...]`.

use anyhow::Result;
use vguard_core::exec_file_safe;

/// Run the program and relay its output streams.
pub fn run_exec(program: &str, args: &[String]) -> Result<()> {
    let output = exec_file_safe(program, args)?;
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    Ok(())
}
