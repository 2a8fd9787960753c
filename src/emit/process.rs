//! Bounded renderer subprocess.

use std::io;
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Owns a spawned child and kills it on drop unless it already exited.
pub(crate) struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    pub(crate) const fn new(child: Child) -> Self {
        Self { child }
    }

    /// Poll until the child exits or `timeout` elapses. `Ok(None)` means the
    /// deadline passed; the child is still running and is killed on drop.
    ///
    /// A timeout too large to represent as an instant waits without limit.
    pub(crate) fn wait_timeout(
        &mut self,
        timeout: Duration,
    ) -> io::Result<Option<ExitStatus>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.child.wait().map(Some);
        };
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            log::debug!("killing renderer process {}", self.child.id());
            let _ = self.child.kill();
            // Reap so no zombie outlives the request.
            let _ = self.child.wait();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::{Command, Stdio};

    use super::*;

    #[test]
    fn fast_child_reports_its_status() {
        let child = Command::new("sh")
            .args(["-c", "exit 3"])
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        let mut guard = ChildGuard::new(child);
        let status =
            guard.wait_timeout(Duration::from_secs(10)).unwrap().unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn unrepresentable_timeout_waits_for_exit() {
        let child = Command::new("sh")
            .args(["-c", "sleep 0.1; exit 5"])
            .spawn()
            .unwrap();
        let mut guard = ChildGuard::new(child);
        let status = guard.wait_timeout(Duration::MAX).unwrap().unwrap();
        assert_eq!(status.code(), Some(5));
    }

    #[test]
    fn slow_child_times_out_and_is_killed() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();
        let mut guard = ChildGuard::new(child);
        let started = Instant::now();
        let waited = guard.wait_timeout(Duration::from_millis(200)).unwrap();
        assert!(waited.is_none());
        drop(guard);
        assert!(started.elapsed() < Duration::from_secs(10));
        // kill -0 fails once the reaped process is gone.
        let alive = Command::new("kill")
            .args(["-0", &pid.to_string()])
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(!alive.success());
    }
}
