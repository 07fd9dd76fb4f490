//! File watcher for source image directories.
//!
//! Collects change events for eligible source files and hands them out in
//! debounced batches, so a burst of saves triggers a single re-conversion.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::discovery::{is_eligible, is_within};
use crate::error::{BassetError, Result};

/// Quiet period after the last event before a batch is released.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Recursive watcher over an input directory.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<PathBuf>,
    debounce: Duration,
}

impl SourceWatcher {
    /// Watch `input_dir` recursively, ignoring anything under `output_dir`.
    pub fn new(input_dir: &Path, output_dir: &Path) -> Result<Self> {
        let (tx, rx) = channel();
        let ignored = output_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    for path in relevant_paths(&event, &ignored) {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(watch_error)?;

        watcher
            .watch(input_dir, RecursiveMode::Recursive)
            .map_err(watch_error)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            debounce: DEBOUNCE,
        })
    }

    /// Block until files change, then return every path changed within the
    /// debounce window. Returns `None` once the watcher has shut down.
    pub fn next_batch(&self) -> Option<Vec<PathBuf>> {
        collect_batch(&self.receiver, self.debounce)
    }
}

/// Wait for one path, then keep collecting until `debounce` passes with no
/// new path. Each path appears once, in arrival order.
///
/// Returns `None` when the sender is gone before anything arrives.
pub fn collect_batch(receiver: &Receiver<PathBuf>, debounce: Duration) -> Option<Vec<PathBuf>> {
    let first = receiver.recv().ok()?;
    let mut batch = vec![first];

    loop {
        match receiver.recv_timeout(debounce) {
            Ok(path) => {
                if !batch.contains(&path) {
                    batch.push(path);
                }
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Some(batch)
}

/// Paths of an event that should trigger a re-conversion.
fn relevant_paths(event: &Event, ignored: &Path) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return Vec::new(),
    }

    event
        .paths
        .iter()
        .filter(|path| is_eligible(path) && !is_within(path, ignored))
        .cloned()
        .collect()
}

fn watch_error(e: notify::Error) -> BassetError {
    BassetError::Watch {
        message: e.to_string(),
    }
}
