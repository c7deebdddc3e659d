//! Polling file watcher.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use anyhow::{Context, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Run `on_change` each time `path` changes and then stays untouched for a
/// quiet period. Runs are sequential; failures are logged and watching goes on.
pub fn watch(path: &Path, mut on_change: impl FnMut() -> Result<()>) -> Result<()> {
    let mut debounce = Debounce::new(modified(path)?, QUIET_PERIOD);
    log::info!("watching {} for changes", path.display());

    loop {
        thread::sleep(POLL_INTERVAL);
        let mtime = match modified(path) {
            Ok(mtime) => mtime,
            Err(err) => {
                log::warn!("{err:#}");
                continue;
            }
        };

        if debounce.observe(mtime, Instant::now()) {
            log::info!("{} changed, recompiling", path.display());
            if let Err(err) = on_change() {
                log::error!("{err:#}");
            }
        }
    }
}

fn modified(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("Failed to stat {}", path.display()))
}

/// Tracks modification times and fires once per burst of changes.
#[derive(Debug)]
struct Debounce {
    last_seen: SystemTime,
    changed_at: Option<Instant>,
    quiet: Duration,
}

impl Debounce {
    fn new(initial: SystemTime, quiet: Duration) -> Self {
        Self {
            last_seen: initial,
            changed_at: None,
            quiet,
        }
    }

    /// Record an observation. True when a change has been followed by `quiet`
    /// without further changes.
    fn observe(&mut self, mtime: SystemTime, now: Instant) -> bool {
        if mtime != self.last_seen {
            self.last_seen = mtime;
            self.changed_at = Some(now);
            return false;
        }

        match self.changed_at {
            Some(at) if now.duration_since(at) >= self.quiet => {
                self.changed_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_unchanged_file_never_fires() {
        let start = Instant::now();
        let mut debounce = Debounce::new(at(1), Duration::from_millis(300));
        assert!(!debounce.observe(at(1), start));
        assert!(!debounce.observe(at(1), start + Duration::from_secs(5)));
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debounce = Debounce::new(at(1), Duration::from_millis(300));

        assert!(!debounce.observe(at(2), start));
        assert!(!debounce.observe(at(2), start + Duration::from_millis(100)));
        assert!(debounce.observe(at(2), start + Duration::from_millis(300)));
        assert!(!debounce.observe(at(2), start + Duration::from_millis(600)));
    }

    #[test]
    fn test_burst_of_changes_restarts_the_wait() {
        let start = Instant::now();
        let mut debounce = Debounce::new(at(1), Duration::from_millis(300));

        assert!(!debounce.observe(at(2), start));
        assert!(!debounce.observe(at(3), start + Duration::from_millis(200)));
        assert!(!debounce.observe(at(3), start + Duration::from_millis(400)));
        assert!(debounce.observe(at(3), start + Duration::from_millis(500)));
    }
}
