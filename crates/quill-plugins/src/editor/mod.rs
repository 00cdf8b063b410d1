//! Editor identity and scheduling context supplied by the host widget.
//!
//! Every editor attached to a host receives an [`EditorHandle`]: a
//! process-unique [`EditorId`] that is never reused, paired with the editor's
//! [`SchedulingContext`]. Plugins key their per-editor sessions by the id and
//! derive cancellable work scopes from the context.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique identity of one editor instance.
///
/// Ids come from a monotonic counter, so two editors never share an id even
/// after the first one has been destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(u64);

impl EditorId {
    /// Allocates a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EditorId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "editor-{}", self.0)
    }
}

/// Native scheduling context of an editor.
///
/// Work scheduled for an editor runs on its Tokio runtime and is cancelled
/// through its token when the editor is destroyed.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    name: String,
    runtime: Handle,
    token: CancellationToken,
}

impl SchedulingContext {
    /// Creates a context with a fresh, uncancelled token.
    #[must_use]
    pub fn new(name: impl Into<String>, runtime: Handle) -> Self {
        Self {
            name: name.into(),
            runtime,
            token: CancellationToken::new(),
        }
    }

    /// Human-readable name used in scope names and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Runtime executing work for the editor.
    #[must_use]
    pub const fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Token cancelled when the editor goes away.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns `true` once the editor's work has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }
}

/// Host-issued handle identifying one live editor.
#[derive(Debug, Clone)]
pub struct EditorHandle {
    id: EditorId,
    scheduling: SchedulingContext,
}

impl EditorHandle {
    /// Creates a handle with a fresh id whose work runs on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        let id = EditorId::next();
        Self {
            id,
            scheduling: SchedulingContext::new(id.to_string(), runtime),
        }
    }

    /// The editor's registry key.
    #[must_use]
    pub const fn id(&self) -> EditorId {
        self.id
    }

    /// The editor's native scheduling context.
    #[must_use]
    pub const fn scheduling(&self) -> &SchedulingContext {
        &self.scheduling
    }
}
