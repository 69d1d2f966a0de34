//! External Process Launcher.
//!
//! REAPER offers no control channel: it is started with a script path as
//! its only argument and never reports back. Liveness is read from the OS
//! process list, which is a best-effort signal only (a different program
//! with the same name counts as running).

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{io_err, ReaperError};

/// The workstation process as seen by the bridge.
pub trait Workstation {
    /// Start `executable` with `script` as its argument. Does not wait.
    fn launch(&self, executable: &Path, script: &Path) -> Result<(), ReaperError>;

    /// Whether a process named like `executable` is currently running.
    fn is_running(&self, executable: &Path) -> bool;
}

impl<W: Workstation + ?Sized> Workstation for &W {
    fn launch(&self, executable: &Path, script: &Path) -> Result<(), ReaperError> {
        (**self).launch(executable, script)
    }

    fn is_running(&self, executable: &Path) -> bool {
        (**self).is_running(executable)
    }
}

/// Launches real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Workstation for ProcessLauncher {
    fn launch(&self, executable: &Path, script: &Path) -> Result<(), ReaperError> {
        tracing::info!("launching {} {}", executable.display(), script.display());
        Command::new(executable)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ReaperError::Launch {
                program: executable.to_path_buf(),
                source,
            })?;
        Ok(())
    }

    fn is_running(&self, executable: &Path) -> bool {
        match process_listing() {
            Ok(listing) => listing_contains(&listing, executable),
            Err(err) => {
                tracing::warn!("cannot inspect process list, assuming not running: {err}");
                false
            }
        }
    }
}

#[cfg(windows)]
fn process_listing() -> Result<String, ReaperError> {
    run_capture("tasklist", &["/FO", "CSV", "/NH"])
}

#[cfg(not(windows))]
fn process_listing() -> Result<String, ReaperError> {
    run_capture("ps", &["-A", "-o", "comm="])
}

fn run_capture(program: &str, args: &[&str]) -> Result<String, ReaperError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| io_err(program, e))?;
    if !output.status.success() {
        return Err(io_err(
            program,
            std::io::Error::other(format!("exited with {}", output.status)),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Whether a process with `pid` exists. A failed inspection counts as alive.
pub fn process_alive(pid: u32) -> bool {
    match pid_listing(pid) {
        Ok(listing) => listing_has_pid(&listing, pid),
        Err(err) => {
            tracing::debug!("cannot inspect pid {pid}, assuming alive: {err}");
            true
        }
    }
}

#[cfg(windows)]
fn pid_listing(pid: u32) -> Result<String, ReaperError> {
    run_capture("tasklist", &["/FI", &format!("PID eq {pid}"), "/FO", "CSV", "/NH"])
}

// `ps -p` exits non-zero for an unknown pid, so the status is not checked.
#[cfg(not(windows))]
fn pid_listing(pid: u32) -> Result<String, ReaperError> {
    let output = Command::new("ps")
        .args(["-p", &pid.to_string(), "-o", "pid="])
        .output()
        .map_err(|e| io_err("ps", e))?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Matches `ps -o pid=` lines and `tasklist /FO CSV` rows.
fn listing_has_pid(listing: &str, pid: u32) -> bool {
    let wanted = pid.to_string();
    listing
        .lines()
        .any(|line| line.split(',').any(|field| field.trim().trim_matches('"') == wanted))
}

/// Whether any line of a process listing names the same program as
/// `executable`, compared case-insensitively by file stem.
///
/// Understands both `tasklist /FO CSV` rows (`"reaper.exe","1234",…`) and
/// `ps -o comm=` lines (bare name or full path).
pub fn listing_contains(listing: &str, executable: &Path) -> bool {
    let Some(wanted) = executable.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    listing
        .lines()
        .filter_map(process_field)
        .filter_map(|name| Path::new(name).file_stem().and_then(|s| s.to_str()))
        .any(|stem| stem.eq_ignore_ascii_case(wanted))
}

fn process_field(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.strip_prefix('"') {
        Some(rest) => rest.split('"').next(),
        None => Some(line),
    }
}

/// Open `path` with the platform's default handler. Does not wait.
pub fn open_in_default_app(path: &Path) -> Result<(), ReaperError> {
    let mut cmd = opener(path);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.spawn().map_err(|source| ReaperError::Launch {
        program: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(windows)]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(windows, target_os = "macos")))]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
