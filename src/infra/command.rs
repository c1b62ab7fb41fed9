use anyhow::{Result, anyhow, bail};
use std::path::Path;
use std::process::Command;
use tracing::{error, info};

/// Render a command line the way a shell would accept it back.
pub fn display_command(program: &str, args: &[&str]) -> String {
    let words = std::iter::once(program).chain(args.iter().copied());
    shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
}

/// Quote a string for log and error messages: single quotes unless the
/// string holds a single quote and no double quote.
pub fn quoted(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Run a command to completion and return its stdout.
///
/// Both the invocation and its outcome are logged. A non-zero exit status or
/// a program missing from the PATH is reported as an error carrying the
/// command line and whatever the command printed.
pub fn call(program: &str, args: &[&str]) -> Result<String> {
    run(Command::new(program), program, args)
}

/// Same as [`call`], with `dir` as the working directory.
pub fn call_in(dir: &Path, program: &str, args: &[&str]) -> Result<String> {
    let mut command = Command::new(program);
    command.current_dir(dir);
    run(command, program, args)
}

fn run(mut command: Command, program: &str, args: &[&str]) -> Result<String> {
    let cmd = quoted(&display_command(program, args));
    info!("running the following: {cmd}");

    let output = command
        .args(args)
        .output()
        .map_err(|e| anyhow!("command {cmd} not found: {e}"))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let retcode = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        let combined = format!("{stdout}{stderr}");
        let message = format!(
            "command {cmd} failed with retcode {retcode}: {}",
            quoted(&combined)
        );
        error!("{message}");
        bail!(message);
    }

    info!("command {cmd} succeeded: {}", quoted(&stdout));
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_single_word() {
        assert_eq!(display_command("echo", &[]), "echo");
    }

    #[test]
    fn test_display_quotes_arguments() {
        assert_eq!(
            display_command("echo", &["we are the borg"]),
            "echo 'we are the borg'"
        );
    }

    #[test]
    fn test_quoted() {
        assert_eq!(quoted("echo"), "'echo'");
        assert_eq!(quoted("echo 'we are the borg'"), "\"echo 'we are the borg'\"");
        assert_eq!(quoted("we are the borg\n"), "'we are the borg\\n'");
        assert_eq!(quoted("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quoted(""), "''");
    }

    #[test]
    fn test_call_returns_stdout() {
        let out = call("echo", &["we are the borg"]).unwrap();
        assert_eq!(out, "we are the borg\n");
    }

    #[test]
    fn test_call_in_directory() {
        let out = call_in(Path::new("/"), "pwd", &[]).unwrap();
        assert_eq!(out, "/\n");
    }

    #[test]
    fn test_call_failure() {
        let err = call("ls", &["no-such-file"]).unwrap_err().to_string();
        assert!(
            err.starts_with("command 'ls no-such-file' failed with retcode 2:"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_call_missing_program() {
        let err = call("no-such-command", &[]).unwrap_err().to_string();
        assert!(
            err.starts_with("command 'no-such-command' not found:"),
            "unexpected error: {err}"
        );
    }
}
