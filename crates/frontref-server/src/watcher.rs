//! File watching for catalog reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Catalog file was written or replaced
    CatalogModified(PathBuf),

    /// Catalog file was removed
    CatalogRemoved(PathBuf),

    /// A stylesheet or asset changed
    AssetModified(PathBuf),
}

/// What the watcher looks at.
#[derive(Debug, Clone, Default)]
struct WatchTargets {
    catalog: Option<PathBuf>,
    assets: Vec<PathBuf>,
}

/// File watcher for detecting catalog and asset changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch a catalog file and any number of asset files or directories.
    ///
    /// Returns the watcher and a channel to receive events. Paths that do not
    /// exist are skipped.
    pub fn new(
        catalog: Option<&Path>,
        assets: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        let mut targets = WatchTargets::default();

        // Editors often replace files, so watch the catalog's directory
        if let Some(catalog) = catalog.filter(|p| p.exists()) {
            let catalog = catalog.canonicalize()?;
            if let Some(parent) = catalog.parent() {
                watcher
                    .watch(parent, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            }
            targets.catalog = Some(catalog);
        }

        for path in assets.iter().filter(|p| p.exists()) {
            let path = path.canonicalize()?;
            watcher
                .watch(&path, RecursiveMode::Recursive)
                .map_err(std::io::Error::other)?;
            targets.assets.push(path);
        }

        std::thread::spawn(move || {
            let debounce = Duration::from_millis(100);
            let mut last: Option<(WatchEvent, Instant)> = None;

            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    let Some(watch_event) = classify_event(path, &event.kind, &targets) else {
                        continue;
                    };

                    // Drop repeats of the same event inside the debounce window
                    let now = Instant::now();
                    if let Some((prev, at)) = &last {
                        if *prev == watch_event && now.duration_since(*at) < debounce {
                            continue;
                        }
                    }
                    last = Some((watch_event.clone(), now));

                    if async_tx.blocking_send(watch_event).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &notify::EventKind,
    targets: &WatchTargets,
) -> Option<WatchEvent> {
    use notify::EventKind;

    if targets.catalog.as_deref() == Some(path) {
        return match kind {
            EventKind::Create(_) | EventKind::Modify(_) => {
                Some(WatchEvent::CatalogModified(path.to_path_buf()))
            }
            EventKind::Remove(_) => Some(WatchEvent::CatalogRemoved(path.to_path_buf())),
            _ => None,
        };
    }

    if targets.assets.iter().any(|asset| path.starts_with(asset)) {
        return match kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                Some(WatchEvent::AssetModified(path.to_path_buf()))
            }
            _ => None,
        };
    }

    None
}
