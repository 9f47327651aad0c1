//! Command implementations for fslock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command returns the process exit code on success;
//! lock errors are mapped to exit codes by the caller.

use crate::cli::{Command, LockArgs, RunArgs, StatusArgs};
use fslock::exit_codes;
use fslock::lock::validate_name;
use fslock::{FsLockError, Lock, LockConfig, Result};
use std::path::Path;
use std::process::{self, ExitStatus};
use std::time::Duration;
use tracing::info;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<i32> {
    match command {
        Command::Run(args) => cmd_run(args),
        Command::Status(args) => cmd_status(args),
    }
}

/// Build the lock described by the shared arguments.
fn open_lock(args: &LockArgs) -> Result<Lock> {
    let config = match &args.config {
        Some(path) => LockConfig::load(path)?,
        None => LockConfig::default(),
    };
    Lock::with_config(&args.dir, &args.name, config)
}

fn parse_timeout(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        FsLockError::Config(format!(
            "invalid timeout {}: expected a non-negative number of seconds",
            seconds
        ))
    })
}

fn cmd_run(args: RunArgs) -> Result<i32> {
    let timeout = args.timeout.map(parse_timeout).transpose()?;
    let lock = open_lock(&args.lock)?;

    let guard = match timeout {
        None => lock.hold()?,
        Some(wait) => match lock.try_hold(wait)? {
            Some(guard) => guard,
            None => {
                eprintln!(
                    "fslock: timed out after {:?} waiting for lock '{}'",
                    wait,
                    lock.name()
                );
                if let Some(holder) = lock.holder() {
                    eprintln!("fslock: held by {}", holder);
                }
                return Ok(exit_codes::NOT_ACQUIRED);
            }
        },
    };

    // clap guarantees at least one element
    let (program, program_args) = args
        .command
        .split_first()
        .ok_or_else(|| FsLockError::Config("no command given".to_string()))?;

    info!(lock = %lock.name(), command = %program, "running command under lock");
    let status = process::Command::new(program)
        .args(program_args)
        .status()
        .map_err(|e| FsLockError::io("run command", Path::new(program), e));

    // Release before reporting a spawn failure so the lock is never leaked.
    let released = guard.release();
    let status = status?;
    released?;

    Ok(exit_code_of(status))
}

fn cmd_status(args: StatusArgs) -> Result<i32> {
    // Querying must not create the lock directory.
    if !args.lock.dir.is_dir() {
        validate_name(&args.lock.name)?;
        println!("{}: free", args.lock.name);
        return Ok(exit_codes::SUCCESS);
    }
    let lock = open_lock(&args.lock)?;

    if !lock.is_locked()? {
        println!("{}: free", lock.name());
        return Ok(exit_codes::SUCCESS);
    }

    match lock.holder() {
        Some(holder) => println!("{}: held by {}", lock.name(), holder),
        None => println!("{}: held (holder unknown)", lock.name()),
    }
    Ok(exit_codes::NOT_ACQUIRED)
}

/// Exit code to report for a finished child, following the shell
/// convention of 128 + signal number for signal deaths.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    exit_codes::IO_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn lock_args(dir: &Path, name: &str) -> LockArgs {
        LockArgs {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            config: None,
        }
    }

    #[test]
    fn parse_timeout_accepts_fractions() {
        assert_eq!(parse_timeout(1.5).unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_timeout(0.0).unwrap(), Duration::ZERO);
    }

    #[test]
    fn parse_timeout_rejects_negative() {
        let err = parse_timeout(-1.0).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn status_reports_free_and_held() {
        let temp_dir = TempDir::new().unwrap();
        let status = || {
            cmd_status(StatusArgs {
                lock: lock_args(temp_dir.path(), "build"),
            })
            .unwrap()
        };

        assert_eq!(status(), exit_codes::SUCCESS);

        let holder = Lock::new(temp_dir.path(), "build").unwrap();
        assert!(holder.try_lock(Duration::ZERO).unwrap());
        assert_eq!(status(), exit_codes::NOT_ACQUIRED);
    }

    #[test]
    fn status_does_not_create_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("locks");

        let code = cmd_status(StatusArgs {
            lock: lock_args(&dir, "build"),
        })
        .unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!dir.exists());

        let err = cmd_status(StatusArgs {
            lock: lock_args(&dir, "Bad_Name"),
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(!dir.exists());
    }

    #[test]
    fn status_rejects_invalid_name() {
        let temp_dir = TempDir::new().unwrap();
        let err = cmd_status(StatusArgs {
            lock: lock_args(temp_dir.path(), "Bad_Name"),
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn open_lock_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("fslock.yaml");
        std::fs::write(&config_path, "wait_delay_ms: 25\n").unwrap();

        let mut args = lock_args(&temp_dir.path().join("locks"), "build");
        args.config = Some(config_path);

        let lock = open_lock(&args).unwrap();
        assert_eq!(lock.config().wait_delay(), Duration::from_millis(25));
    }

    #[test]
    fn open_lock_reports_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = lock_args(temp_dir.path(), "build");
        args.config = Some(PathBuf::from("/nonexistent/fslock.yaml"));

        let err = open_lock(&args).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[cfg(unix)]
    #[test]
    fn run_passes_child_exit_code_through_and_releases() {
        let temp_dir = TempDir::new().unwrap();
        let code = cmd_run(RunArgs {
            lock: lock_args(temp_dir.path(), "build"),
            timeout: None,
            command: vec!["sh".into(), "-c".into(), "exit 7".into()],
        })
        .unwrap();

        assert_eq!(code, 7);
        assert!(!temp_dir.path().join("build").exists());
    }

    #[cfg(unix)]
    #[test]
    fn run_holds_lock_while_child_runs() {
        let temp_dir = TempDir::new().unwrap();
        let claim = temp_dir.path().join("build");
        let code = cmd_run(RunArgs {
            lock: lock_args(temp_dir.path(), "build"),
            timeout: Some(1.0),
            command: vec![
                "sh".into(),
                "-c".into(),
                format!("test -f '{}'", claim.join("held").display()),
            ],
        })
        .unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!claim.exists());
    }

    #[test]
    fn run_times_out_when_lock_is_held() {
        let temp_dir = TempDir::new().unwrap();
        let holder = Lock::new(temp_dir.path(), "build").unwrap();
        assert!(holder.try_lock(Duration::ZERO).unwrap());

        let code = cmd_run(RunArgs {
            lock: lock_args(temp_dir.path(), "build"),
            timeout: Some(0.0),
            command: vec!["true".into()],
        })
        .unwrap();

        assert_eq!(code, exit_codes::NOT_ACQUIRED);
        assert!(holder.is_held());
    }

    #[test]
    fn run_releases_lock_when_command_cannot_start() {
        let temp_dir = TempDir::new().unwrap();
        let err = cmd_run(RunArgs {
            lock: lock_args(temp_dir.path(), "build"),
            timeout: None,
            command: vec!["fslock-test-no-such-program".into()],
        })
        .unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
        assert!(!temp_dir.path().join("build").exists());
    }
}
