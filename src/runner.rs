//! Child-process handle for background operation
//!
//! Long-running batch commands can re-run themselves detached from the
//! invoking shell. The child is an independent OS process sharing no memory
//! with the CLI; the only channel is its exit status.

use std::process::{Child, Command, ExitStatus, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

/// Handle to a spawned service process with start/poll/terminate semantics.
#[derive(Debug)]
pub struct ServiceRunner {
    child: Child,
    program: String,
}

impl ServiceRunner {
    /// Spawn a child process with stdio detached.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self> {
        debug!("Spawning {} {:?}", program, args);
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(Self {
            child,
            program: program.to_string(),
        })
    }

    /// The child's OS process id.
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Non-blocking status check: `None` while the child is still running.
    pub fn poll(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Block until the child exits.
    pub fn wait(mut self) -> Result<ExitStatus> {
        Ok(self.child.wait()?)
    }

    /// Kill the child. Safe to call after exit; the error is swallowed then.
    pub fn terminate(&mut self) -> Result<()> {
        match self.child.kill() {
            Ok(()) => {
                self.child.wait()?;
                info!("Terminated {} (pid {})", self.program, self.child.id());
                Ok(())
            }
            // Already exited
            Err(err) if err.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Re-spawn the current executable detached, with the given arguments.
///
/// Returns the child pid; the caller prints it and exits, leaving the work
/// to the background process.
pub fn respawn_background(args: &[String]) -> Result<u32> {
    let exe = std::env::current_exe()
        .map_err(|e| Error::Other(format!("Unable to locate current executable: {}", e)))?;
    let runner = ServiceRunner::spawn(&exe.to_string_lossy(), args)?;
    Ok(runner.pid())
}
