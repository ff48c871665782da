//! # Shader Hot-Reloading
//!
//! Watches one WGSL file and forwards its contents whenever it is written.
//! The watcher runs on notify's own thread; the event loop drains the channel
//! once per frame and hands the source to the renderer, which validates it
//! before swapping pipelines.
//!
//! The parent directory is watched rather than the file itself so editors
//! that save by renaming a temporary file are still picked up.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tracing::{debug, error, info, warn};

/// Keeps the file watcher alive and exposes the latest shader source.
pub struct ShaderWatcher {
    _watcher: RecommendedWatcher,
    updates: Receiver<String>,
    path: PathBuf,
}

impl ShaderWatcher {
    /// Most recent source written since the last call, if any.
    pub fn latest(&self) -> Option<String> {
        self.updates.try_iter().last()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Start watching `path`. Its current contents are queued immediately.
///
/// # Errors
///
/// The file cannot be read or its directory cannot be watched.
pub fn start(path: &Path) -> Result<ShaderWatcher> {
    let path = path
        .canonicalize()
        .with_context(|| format!("shader file {} not found", path.display()))?;
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .context("shader path has no parent directory")?;
    let name = path
        .file_name()
        .map(OsString::from)
        .context("shader path has no file name")?;

    let (tx, updates) = mpsc::channel();
    let initial = fs::read_to_string(&path)
        .with_context(|| format!("failed to read shader at {}", path.display()))?;
    // The receiver is alive; this cannot fail.
    let _ = tx.send(initial);

    let target = path.clone();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => process_file_event(&event, &name, &target, &tx),
            Err(e) => error!("File watcher error: {e:?}"),
        }
    })
    .context("failed to create file watcher")?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;

    info!("Shader watcher active on {}", path.display());
    Ok(ShaderWatcher {
        _watcher: watcher,
        updates,
        path,
    })
}

fn process_file_event(event: &Event, name: &OsString, target: &Path, tx: &Sender<String>) {
    // Only care about file modifications and creations
    if !event.kind.is_modify() && !event.kind.is_create() {
        return;
    }
    if !event.paths.iter().any(|p| p.file_name() == Some(name.as_os_str())) {
        return;
    }

    match fs::read_to_string(target) {
        Ok(source) => {
            debug!("Shader file modified: {}", target.display());
            if tx.send(source).is_err() {
                debug!("shader receiver gone, dropping update");
            }
        }
        // Mid-save; the next event carries the finished file.
        Err(e) => warn!("failed to read {}: {e}", target.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_source_is_queued() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lava.wgsl");
        fs::write(&path, "// v1").unwrap();

        let watcher = start(&path).unwrap();
        assert_eq!(watcher.latest().as_deref(), Some("// v1"));
        assert_eq!(watcher.latest(), None);
        assert!(watcher.path().ends_with("lava.wgsl"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(start(&dir.path().join("nope.wgsl")).is_err());
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("lava.wgsl");
        fs::write(&target, "// v2").unwrap();
        let (tx, rx) = mpsc::channel();

        let event = Event::new(notify::EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(dir.path().join("other.wgsl"));
        process_file_event(&event, &OsString::from("lava.wgsl"), &target, &tx);
        assert!(rx.try_recv().is_err());

        let event = Event::new(notify::EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(target.clone());
        process_file_event(&event, &OsString::from("lava.wgsl"), &target, &tx);
        assert_eq!(rx.try_recv().unwrap(), "// v2");
    }
}
