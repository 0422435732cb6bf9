//! The post list screen.
//!
//! `ListView` holds a snapshot of the collection, draws an empty
//! collection as its own screen, and deletes behind a confirmation gate.
//! Loads and deletes come in `begin_*`/`finish_*` halves for hosts that run
//! the call elsewhere; `mount` and `confirm_delete` run both inline.

use crate::access::PostAccess;
use crate::error::TransportError;
use crate::fetch::{FetchGuard, Ticket};
use crate::notify::{Notification, Notifier};
use crate::types::{Post, PostId};

pub const LOAD_FAILED: &str = "Failed to load posts.";
pub const DELETED: &str = "Post deleted.";
pub const DELETE_FAILED: &str = "Failed to delete post.";

/// Where the list is in its lifecycle. Only a fresh load leaves `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready(Vec<Post>),
    Failed(String),
}

/// What the host should draw. An empty collection is its own screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScreen<'a> {
    Loading,
    Empty,
    Posts(&'a [Post]),
    Failed(&'a str),
}

/// Controller for the post list.
///
/// The held posts are a snapshot of the server collection. A successful
/// delete evicts the post locally without re-fetching, so the snapshot can
/// drift from the server if posts change elsewhere.
#[derive(Debug)]
pub struct ListView<A, N> {
    access: A,
    notifier: N,
    state: ListState,
    guard: FetchGuard<()>,
    pending_delete: Option<PostId>,
    deleting: bool,
}

impl<A: PostAccess, N: Notifier> ListView<A, N> {
    pub fn new(access: A, notifier: N) -> Self {
        Self {
            access,
            notifier,
            state: ListState::Loading,
            guard: FetchGuard::new(),
            pending_delete: None,
            deleting: false,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn screen(&self) -> ListScreen<'_> {
        match &self.state {
            ListState::Loading => ListScreen::Loading,
            ListState::Ready(posts) if posts.is_empty() => ListScreen::Empty,
            ListState::Ready(posts) => ListScreen::Posts(posts.as_slice()),
            ListState::Failed(message) => ListScreen::Failed(message.as_str()),
        }
    }

    pub fn posts(&self) -> Option<&[Post]> {
        match &self.state {
            ListState::Ready(posts) => Some(posts.as_slice()),
            _ => None,
        }
    }

    /// Fetches the collection and applies it.
    pub fn mount(&mut self) {
        let ticket = self.begin_load();
        let result = self.access.list();
        self.finish_load(&ticket, result);
    }

    pub fn begin_load(&mut self) -> Ticket<()> {
        self.state = ListState::Loading;
        self.guard.begin(())
    }

    /// Returns `false` when the result was for a retired load and dropped.
    pub fn finish_load(&mut self, ticket: &Ticket<()>, result: Result<Vec<Post>, TransportError>) -> bool {
        if !self.guard.settle(ticket) {
            tracing::debug!("dropping stale post list");
            return false;
        }
        match result {
            Ok(posts) => self.state = ListState::Ready(posts),
            Err(_) => {
                self.state = ListState::Failed(LOAD_FAILED.to_string());
                self.notifier.notify(Notification::error(LOAD_FAILED));
            }
        }
        true
    }

    pub fn unmount(&mut self) {
        self.guard.cancel();
        self.pending_delete = None;
    }

    /// Opens the confirmation gate for deleting `id`. Ignored while a
    /// delete is in flight.
    pub fn request_delete(&mut self, id: PostId) {
        if !self.deleting {
            self.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.pending_delete = None;
        }
    }

    pub fn pending_delete(&self) -> Option<&PostId> {
        self.pending_delete.as_ref()
    }

    /// True between `begin_delete` and `finish_delete`.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Deletes the post awaiting confirmation, if any. The gate closes
    /// whatever the outcome.
    pub fn confirm_delete(&mut self) -> bool {
        match self.begin_delete() {
            Some(id) => {
                let result = self.access.remove(&id);
                self.finish_delete(result)
            }
            None => false,
        }
    }

    /// Deletes `id` without going through the confirmation gate, for hosts
    /// that confirm on their own.
    pub fn delete(&mut self, id: &PostId) -> bool {
        if self.deleting {
            return false;
        }
        self.pending_delete = Some(id.clone());
        self.confirm_delete()
    }

    /// Starts deleting the post awaiting confirmation and returns its id.
    /// `None` without a pending request or while another delete is out.
    pub fn begin_delete(&mut self) -> Option<PostId> {
        if self.deleting {
            return None;
        }
        let id = self.pending_delete.clone()?;
        self.deleting = true;
        Some(id)
    }

    /// Evicts the removed post from the held posts on success. The held
    /// posts are left untouched on failure.
    pub fn finish_delete(&mut self, result: Result<PostId, TransportError>) -> bool {
        if !self.deleting {
            tracing::debug!("dropping result for a delete that was never started");
            return false;
        }
        self.deleting = false;
        self.pending_delete = None;

        match result {
            Ok(removed) => {
                if let ListState::Ready(posts) = &mut self.state {
                    posts.retain(|post| post.id != removed);
                }
                self.notifier.notify(Notification::success(DELETED));
                true
            }
            Err(_) => {
                self.notifier.notify(Notification::error(DELETE_FAILED));
                false
            }
        }
    }
}
