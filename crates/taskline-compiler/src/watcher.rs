//! Change watcher
//!
//! Subscribes to the posts directory and the timeline, task and template
//! files, and recompiles when they change.
//!
//! # Architecture
//!
//! ```text
//! notify::RecommendedWatcher ──→ Subscription::forward ──→ mpsc channel
//!                            (re-arm, WatchTargets::classify)     │
//!                          ChangeWatcher::run_events ←────────────┘
//!                            (coalesce within debounce window)
//!                                      │
//!                              Compiler::compile_logged
//! ```
//!
//! Paths that do not exist yet are watched through their nearest existing
//! ancestor and picked up once they are created.
//!
//! Compilations run one at a time on the consuming task, so runs never
//! overlap. A failed compilation is logged and the loop keeps going.

use crate::compiler::Compiler;
use crate::error::WatchError;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Kind of file-system change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// File or directory created
    Added,
    /// Contents or metadata modified
    Changed,
    /// File or directory removed
    Removed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Removed => "removed",
        })
    }
}

/// A relevant change to a watched path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// What happened
    pub kind: ChangeKind,
    /// Affected path
    pub path: PathBuf,
}

impl ChangeEvent {
    /// Create change event
    #[inline]
    #[must_use]
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Paths whose changes are relevant
///
/// Directories are watched recursively. Files are watched through their
/// parent directory so they can be created, replaced or deleted at any time.
/// Hidden entries (any name starting with `.`) below a watched directory are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchTargets {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl WatchTargets {
    /// Create targets from already-resolved paths
    #[must_use]
    pub fn new(dirs: Vec<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self { dirs, files }
    }

    /// Targets for a compiler: its posts directory plus the timeline, task
    /// and template files, resolved to absolute paths
    ///
    /// # Errors
    /// `WatchError::Resolve` if the working directory cannot be determined
    pub fn for_compiler(compiler: &Compiler) -> Result<Self, WatchError> {
        let config = compiler.config();
        let dirs = vec![resolve(&config.posts_dir)?];
        let files = config
            .watched_files()
            .iter()
            .map(|f| resolve(f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dirs, files))
    }

    /// Watched directories
    #[inline]
    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Watched files
    #[inline]
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Paths to hand to the platform watcher, with their mode
    #[must_use]
    pub fn subscriptions(&self) -> Vec<(PathBuf, RecursiveMode)> {
        let mut subscriptions: Vec<(PathBuf, RecursiveMode)> = self
            .dirs
            .iter()
            .map(|d| (d.clone(), RecursiveMode::Recursive))
            .collect();

        for file in &self.files {
            let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
                continue;
            };
            let covered = self.dirs.iter().any(|d| parent.starts_with(d))
                || subscriptions.iter().any(|(p, _)| p == parent);
            if !covered {
                subscriptions.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
            }
        }

        subscriptions
    }

    /// Whether a path is one of the targets
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        if self.files.iter().any(|f| f == path) {
            return true;
        }
        self.dirs.iter().any(|dir| {
            path.strip_prefix(dir)
                .is_ok_and(|relative| !is_hidden(relative))
        })
    }

    /// `Added` events for existing targets at or below any of `roots`
    fn present_under(&self, roots: &[PathBuf]) -> Vec<ChangeEvent> {
        self.dirs
            .iter()
            .chain(&self.files)
            .filter(|target| roots.iter().any(|root| target.starts_with(root)) && target.exists())
            .map(|target| ChangeEvent::new(ChangeKind::Added, target.clone()))
            .collect()
    }

    /// Convert a raw notify event into relevant change events
    #[must_use]
    pub fn classify(&self, event: &Event) -> Vec<ChangeEvent> {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Added,
            EventKind::Remove(_) => ChangeKind::Removed,
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => ChangeKind::Removed,
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => ChangeKind::Added,
            EventKind::Modify(_) => ChangeKind::Changed,
            _ => return Vec::new(),
        };

        event
            .paths
            .iter()
            .filter(|path| self.matches(path))
            .map(|path| ChangeEvent::new(kind, path.clone()))
            .collect()
    }
}

/// Summary of a finished watch loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Change events received
    pub events: u64,
    /// Successful compilations
    pub compilations: u64,
    /// Failed compilations
    pub failures: u64,
}

/// Live platform subscription for a set of [`WatchTargets`]
///
/// A subscription path that does not exist yet is covered by a
/// non-recursive watch on its nearest existing ancestor. Every layout
/// change re-arms the watches, so directories created or removed after
/// startup are picked up.
pub struct Subscription {
    watcher: RecommendedWatcher,
    targets: WatchTargets,
    armed: BTreeMap<PathBuf, RecursiveMode>,
}

impl Subscription {
    /// Wrap a platform watcher; nothing is watched until [`Subscription::rearm`]
    #[must_use]
    pub fn new(watcher: RecommendedWatcher, targets: WatchTargets) -> Self {
        Self {
            watcher,
            targets,
            armed: BTreeMap::new(),
        }
    }

    /// Targets this subscription serves
    #[inline]
    #[must_use]
    pub fn targets(&self) -> &WatchTargets {
        &self.targets
    }

    /// Whether `path` currently has a platform watch
    #[must_use]
    pub fn is_watching(&self, path: &Path) -> bool {
        self.armed.contains_key(path)
    }

    /// Bring platform watches in line with what exists on disk
    ///
    /// Watches on removed paths are dropped, missing paths fall back to their
    /// nearest existing ancestor. Returns an `Added` event for every target
    /// under a newly armed path, since it may have been created before the
    /// watch was in place.
    ///
    /// # Errors
    /// `WatchError::Subscribe` if an existing path cannot be watched
    pub fn rearm(&mut self) -> Result<Vec<ChangeEvent>, WatchError> {
        let stale: Vec<PathBuf> = self.armed.keys().filter(|p| !p.exists()).cloned().collect();
        for path in stale {
            self.armed.remove(&path);
            // The platform usually drops the watch itself.
            let _ = self.watcher.unwatch(&path);
            tracing::debug!(path = %path.display(), "watched path removed");
        }

        let mut appeared = Vec::new();
        for (path, mode) in self.targets.subscriptions() {
            if path.is_dir() {
                if self.watch(&path, mode)? {
                    appeared.push(path);
                }
            } else if let Some(ancestor) = nearest_existing(&path) {
                if self.watch(&ancestor, RecursiveMode::NonRecursive)? {
                    tracing::debug!(
                        path = %path.display(),
                        standby = %ancestor.display(),
                        "watch path does not exist yet, watching ancestor"
                    );
                }
            } else {
                tracing::warn!(path = %path.display(), "no existing ancestor to watch");
            }
        }

        Ok(self.targets.present_under(&appeared))
    }

    /// Turn raw platform events into change events until `changes` closes
    pub async fn forward(
        mut self,
        mut raw: mpsc::UnboundedReceiver<Event>,
        changes: mpsc::UnboundedSender<ChangeEvent>,
    ) {
        while let Some(event) = raw.recv().await {
            let mut batch = Vec::new();
            if changes_layout(&event.kind) {
                match self.rearm() {
                    Ok(appeared) => batch.extend(appeared),
                    Err(e) => tracing::warn!(error = %e, "failed to re-arm file watches"),
                }
            }
            batch.extend(self.targets.classify(&event));

            for change in batch {
                if changes.send(change).is_err() {
                    return;
                }
            }
        }
    }

    fn watch(&mut self, path: &Path, mode: RecursiveMode) -> Result<bool, WatchError> {
        if self.armed.contains_key(path) {
            return Ok(false);
        }
        self.watcher
            .watch(path, mode)
            .map_err(|source| WatchError::Subscribe {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), ?mode, "watching");
        self.armed.insert(path.to_path_buf(), mode);
        Ok(true)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("targets", &self.targets)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

/// Longest a burst can postpone compilation, in multiples of the debounce
const MAX_WAIT_FACTOR: u32 = 4;

/// Recompiles a project whenever its inputs change
#[derive(Debug, Clone)]
pub struct ChangeWatcher {
    compiler: Compiler,
    debounce: Duration,
    max_wait: Duration,
}

impl ChangeWatcher {
    /// Create watcher using the compiler's configured debounce window
    #[must_use]
    pub fn new(compiler: Compiler) -> Self {
        let debounce = compiler.config().debounce();
        Self {
            compiler,
            debounce,
            max_wait: debounce * MAX_WAIT_FACTOR,
        }
    }

    /// Override the debounce window (zero compiles once per event)
    ///
    /// Also resets the longest coalescing window to a few debounce periods.
    #[inline]
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self.max_wait = debounce * MAX_WAIT_FACTOR;
        self
    }

    /// Override the longest time a burst of events may delay compilation
    #[inline]
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Subscribe to the platform watcher
    ///
    /// Raw events are delivered on the returned channel for as long as the
    /// subscription is alive; [`Subscription::forward`] turns them into
    /// change events.
    ///
    /// # Errors
    /// - `WatchError::Resolve` if target paths cannot be resolved
    /// - `WatchError::Create` if the platform watcher cannot start
    /// - `WatchError::Subscribe` if an existing path cannot be watched
    pub fn subscribe(&self) -> Result<(Subscription, mpsc::UnboundedReceiver<Event>), WatchError> {
        let targets = WatchTargets::for_compiler(&self.compiler)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            // Receiver gone means the loop has stopped.
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        })
        .map_err(WatchError::Create)?;

        let mut subscription = Subscription::new(watcher, targets);
        subscription.rearm()?;
        Ok((subscription, rx))
    }

    /// Subscribe and recompile on every change until the watcher stops
    ///
    /// In practice this runs until the process is terminated or the future
    /// is dropped.
    ///
    /// # Errors
    /// See [`ChangeWatcher::subscribe`]
    pub async fn run(&self) -> Result<WatchSummary, WatchError> {
        let (subscription, raw) = self.subscribe()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let _forward = AbortOnDrop(tokio::spawn(subscription.forward(raw, tx)));
        tracing::info!("watching for changes, press Ctrl+C to stop");

        Ok(self.run_events(rx).await)
    }

    /// Consume change events, recompiling once per burst
    ///
    /// A burst ends after a quiet period of one debounce window, or once it
    /// has lasted the maximum wait. Returns when the channel is closed and
    /// drained.
    pub async fn run_events(&self, mut events: mpsc::UnboundedReceiver<ChangeEvent>) -> WatchSummary {
        let mut summary = WatchSummary::default();

        while let Some(event) = events.recv().await {
            log_event(&event);
            summary.events += 1;

            if !self.debounce.is_zero() {
                let deadline = Instant::now() + self.max_wait;
                loop {
                    let quiet = self.debounce.min(deadline.saturating_duration_since(Instant::now()));
                    if quiet.is_zero() {
                        break;
                    }
                    match tokio::time::timeout(quiet, events.recv()).await {
                        Ok(Some(event)) => {
                            log_event(&event);
                            summary.events += 1;
                        }
                        Ok(None) | Err(_) => break,
                    }
                }
            }

            match self.compiler.compile_logged().await {
                Some(_) => summary.compilations += 1,
                None => summary.failures += 1,
            }
        }

        summary
    }
}

/// Aborts the wrapped task when dropped
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn log_event(event: &ChangeEvent) {
    tracing::info!(kind = %event.kind, path = %event.path.display(), "file {}", event.kind);
}

/// Events that may create or remove watched directories
fn changes_layout(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    )
}

fn is_hidden(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

fn nearest_existing(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .skip(1)
        .find(|p| !p.as_os_str().is_empty() && p.is_dir())
        .map(Path::to_path_buf)
}

/// Make a path absolute, canonicalizing its deepest existing ancestor
fn resolve(path: &Path) -> Result<PathBuf, WatchError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| WatchError::Resolve {
                path: path.to_path_buf(),
                source,
            })?
            .join(path)
    };

    for ancestor in absolute.ancestors() {
        if let Ok(canonical) = std::fs::canonicalize(ancestor) {
            let rest = absolute.strip_prefix(ancestor).unwrap_or(Path::new(""));
            if rest.as_os_str().is_empty() {
                return Ok(canonical);
            }
            return Ok(canonical.join(rest));
        }
    }
    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use notify::event::{CreateKind, DataChange, RemoveKind};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn targets() -> WatchTargets {
        WatchTargets::new(
            vec![PathBuf::from("/site/post")],
            vec![
                PathBuf::from("/site/config/timeline.md"),
                PathBuf::from("/site/config/task.md"),
                PathBuf::from("/site/src/template.html"),
            ],
        )
    }

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    fn project() -> (TempDir, Compiler) {
        let dir = TempDir::new().unwrap();
        let compiler = Compiler::new(CompilerConfig::new().with_root(dir.path()));
        (dir, compiler)
    }

    #[test]
    fn classifies_event_kinds() {
        let t = targets();

        let added = t.classify(&event(EventKind::Create(CreateKind::File), "/site/post/a.md"));
        let changed = t.classify(&event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/site/post/a.md",
        ));
        let removed = t.classify(&event(EventKind::Remove(RemoveKind::File), "/site/config/timeline.md"));

        assert_eq!(added, vec![ChangeEvent::new(ChangeKind::Added, "/site/post/a.md")]);
        assert_eq!(changed[0].kind, ChangeKind::Changed);
        assert_eq!(removed[0].kind, ChangeKind::Removed);
    }

    #[test]
    fn renames_map_to_add_and_remove() {
        let t = targets();

        let from = t.classify(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            "/site/post/old.md",
        ));
        let to = t.classify(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            "/site/post/new.md",
        ));

        assert_eq!(from[0].kind, ChangeKind::Removed);
        assert_eq!(to[0].kind, ChangeKind::Added);
    }

    #[test]
    fn access_events_are_ignored() {
        let t = targets();
        let access = event(EventKind::Access(notify::event::AccessKind::Any), "/site/post/a.md");
        assert!(t.classify(&access).is_empty());
    }

    #[test]
    fn unrelated_and_hidden_paths_are_ignored() {
        let t = targets();

        assert!(!t.matches(Path::new("/site/config/other.md")));
        assert!(!t.matches(Path::new("/site/dist/index.html")));
        assert!(!t.matches(Path::new("/site/post/.a.md.swp")));
        assert!(!t.matches(Path::new("/site/post/.git/HEAD")));
        assert!(t.matches(Path::new("/site/post/nested/a.md")));
        assert!(t.matches(Path::new("/site/config/task.md")));
    }

    #[test]
    fn subscriptions_watch_file_parents_once() {
        let subs = targets().subscriptions();

        assert_eq!(
            subs,
            vec![
                (PathBuf::from("/site/post"), RecursiveMode::Recursive),
                (PathBuf::from("/site/config"), RecursiveMode::NonRecursive),
                (PathBuf::from("/site/src"), RecursiveMode::NonRecursive),
            ]
        );
    }

    #[test]
    fn files_inside_watched_dir_need_no_extra_subscription() {
        let t = WatchTargets::new(
            vec![PathBuf::from("/site/post")],
            vec![PathBuf::from("/site/post/timeline.md")],
        );
        assert_eq!(t.subscriptions().len(), 1);
    }

    #[test]
    fn targets_for_compiler_are_absolute() {
        let (_dir, compiler) = project();
        let t = WatchTargets::for_compiler(&compiler).unwrap();

        assert_eq!(t.dirs().len(), 1);
        assert_eq!(t.files().len(), 3);
        assert!(t.dirs().iter().chain(t.files()).all(|p| p.is_absolute()));
    }

    #[tokio::test]
    async fn burst_is_coalesced_into_one_compilation() {
        let (dir, compiler) = project();
        let watcher = ChangeWatcher::new(compiler).with_debounce(Duration::from_millis(50));
        let (tx, rx) = mpsc::unbounded_channel();

        for name in ["a.md", "b.md", "c.md"] {
            tx.send(ChangeEvent::new(ChangeKind::Added, dir.path().join("post").join(name)))
                .unwrap();
        }
        drop(tx);

        let summary = watcher.run_events(rx).await;

        assert_eq!(
            summary,
            WatchSummary {
                events: 3,
                compilations: 1,
                failures: 0,
            }
        );
        assert!(dir.path().join("dist/index.html").exists());
    }

    #[tokio::test]
    async fn zero_debounce_compiles_per_event() {
        let (_dir, compiler) = project();
        let watcher = ChangeWatcher::new(compiler).with_debounce(Duration::ZERO);
        let (tx, rx) = mpsc::unbounded_channel();

        for _ in 0..3 {
            tx.send(ChangeEvent::new(ChangeKind::Changed, "/x")).unwrap();
        }
        drop(tx);

        let summary = watcher.run_events(rx).await;
        assert_eq!(summary.compilations, 3);
    }

    #[tokio::test]
    async fn failed_compilation_keeps_loop_alive() {
        let (dir, compiler) = project();
        std::fs::create_dir_all(dir.path().join("src/template.html")).unwrap();
        let watcher = ChangeWatcher::new(compiler).with_debounce(Duration::ZERO);
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(ChangeEvent::new(ChangeKind::Changed, "/x")).unwrap();
        tx.send(ChangeEvent::new(ChangeKind::Changed, "/y")).unwrap();
        drop(tx);

        let summary = watcher.run_events(rx).await;
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.events, 2);
    }

    fn inert_watcher() -> RecommendedWatcher {
        notify::recommended_watcher(|_: notify::Result<Event>| {}).unwrap()
    }

    #[test]
    fn missing_parent_is_armed_once_it_appears() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let posts = root.join("post");
        let config = root.join("config");
        let timeline = config.join("timeline.md");
        std::fs::create_dir(&posts).unwrap();

        let targets = WatchTargets::new(vec![posts.clone()], vec![timeline.clone()]);
        let mut subscription = Subscription::new(inert_watcher(), targets);
        subscription.rearm().unwrap();

        assert!(subscription.is_watching(&posts));
        assert!(subscription.is_watching(&root));
        assert!(!subscription.is_watching(&config));

        std::fs::create_dir(&config).unwrap();
        std::fs::write(&timeline, "gantt").unwrap();
        let appeared = subscription.rearm().unwrap();

        assert!(subscription.is_watching(&config));
        assert_eq!(appeared, vec![ChangeEvent::new(ChangeKind::Added, timeline)]);
        assert!(subscription.rearm().unwrap().is_empty());

        std::fs::remove_dir_all(&config).unwrap();
        subscription.rearm().unwrap();
        assert!(!subscription.is_watching(&config));
    }

    #[test]
    fn nested_missing_directories_are_armed_level_by_level() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let deep = root.join("a/b");
        let file = deep.join("timeline.md");

        let targets = WatchTargets::new(Vec::new(), vec![file.clone()]);
        let mut subscription = Subscription::new(inert_watcher(), targets);
        subscription.rearm().unwrap();
        assert!(subscription.is_watching(&root));

        std::fs::create_dir(root.join("a")).unwrap();
        assert!(subscription.rearm().unwrap().is_empty());
        assert!(subscription.is_watching(&root.join("a")));

        std::fs::create_dir(&deep).unwrap();
        std::fs::write(&file, "gantt").unwrap();
        let appeared = subscription.rearm().unwrap();
        assert!(subscription.is_watching(&deep));
        assert_eq!(appeared, vec![ChangeEvent::new(ChangeKind::Added, file)]);
    }

    #[test]
    fn created_posts_dir_reports_itself() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let posts = root.join("post");

        let targets = WatchTargets::new(vec![posts.clone()], Vec::new());
        let mut subscription = Subscription::new(inert_watcher(), targets);
        subscription.rearm().unwrap();

        std::fs::create_dir(&posts).unwrap();
        let appeared = subscription.rearm().unwrap();
        assert_eq!(appeared, vec![ChangeEvent::new(ChangeKind::Added, posts)]);
    }

    #[test]
    fn resolve_canonicalizes_existing_prefix_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), root);
        assert_eq!(
            resolve(&dir.path().join("config/timeline.md")).unwrap(),
            root.join("config/timeline.md")
        );
    }

    #[test]
    fn layout_events() {
        assert!(changes_layout(&EventKind::Create(CreateKind::Folder)));
        assert!(changes_layout(&EventKind::Remove(RemoveKind::Folder)));
        assert!(changes_layout(&EventKind::Modify(ModifyKind::Name(RenameMode::To))));
        assert!(!changes_layout(&EventKind::Modify(ModifyKind::Data(DataChange::Content))));
    }

    #[tokio::test]
    async fn steady_stream_still_compiles() {
        let (_dir, compiler) = project();
        let watcher = ChangeWatcher::new(compiler)
            .with_debounce(Duration::from_millis(100))
            .with_max_wait(Duration::from_millis(300));
        let (tx, rx) = mpsc::unbounded_channel();

        // Events 25 ms apart never leave a full debounce window of quiet.
        let producer = tokio::spawn(async move {
            for _ in 0..40 {
                tx.send(ChangeEvent::new(ChangeKind::Changed, "/x")).unwrap();
                tokio::time::sleep(Duration::from_millis(25)).await;
            }
        });

        let summary = watcher.run_events(rx).await;
        producer.await.unwrap();

        assert_eq!(summary.events, 40);
        assert!(summary.compilations >= 2, "{summary:?}");
    }

    #[test]
    fn max_wait_follows_debounce() {
        let (_dir, compiler) = project();
        let watcher = ChangeWatcher::new(compiler).with_debounce(Duration::from_millis(50));
        assert_eq!(watcher.max_wait, Duration::from_millis(50 * u64::from(MAX_WAIT_FACTOR)));
    }

    #[test]
    fn change_kind_display() {
        assert_eq!(ChangeKind::Added.to_string(), "added");
        assert_eq!(ChangeKind::Removed.to_string(), "removed");
    }
}
