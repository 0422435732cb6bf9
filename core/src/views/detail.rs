//! The single-post screen.
//!
//! `DetailView` distinguishes a missing post from a failed load, and
//! deletes behind a confirmation gate. Once the delete succeeds the post is
//! gone from the view and cannot be deleted again; the host is expected to
//! follow the returned route back to the list.

use crate::access::PostAccess;
use crate::error::TransportError;
use crate::fetch::{FetchGuard, Ticket};
use crate::notify::{Notification, Notifier};
use crate::route::Route;
use crate::types::{Post, PostId};

pub const LOAD_FAILED: &str = "Failed to load post.";
pub const DELETED: &str = "Post deleted.";
pub const DELETE_FAILED: &str = "Failed to delete post.";

/// What the detail screen shows for its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Ready(Post),
    Failed(String),
    /// The server reported no post for this id.
    NotFound,
    /// This view deleted the post.
    Deleted,
}

/// Controller for a single post, keyed by the id in the route.
#[derive(Debug)]
pub struct DetailView<A, N> {
    access: A,
    notifier: N,
    id: PostId,
    state: DetailState,
    guard: FetchGuard<PostId>,
    confirming: bool,
    deleting: bool,
    action_error: Option<String>,
}

impl<A: PostAccess, N: Notifier> DetailView<A, N> {
    pub fn new(access: A, notifier: N, id: PostId) -> Self {
        Self {
            access,
            notifier,
            id,
            state: DetailState::Loading,
            guard: FetchGuard::new(),
            confirming: false,
            deleting: false,
            action_error: None,
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            DetailState::Ready(post) => Some(post),
            _ => None,
        }
    }

    /// Error from the last failed action; the loaded post stays on screen.
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn mount(&mut self) {
        self.show(self.id.clone());
    }

    /// Switches to `id` and loads it; any load for the previous id is
    /// retired.
    pub fn show(&mut self, id: PostId) {
        let ticket = self.begin_load(id);
        let result = self.access.get(ticket.key());
        self.finish_load(&ticket, result);
    }

    pub fn begin_load(&mut self, id: PostId) -> Ticket<PostId> {
        self.id = id.clone();
        self.state = DetailState::Loading;
        self.confirming = false;
        self.action_error = None;
        self.guard.begin(id)
    }

    /// Returns `false` when the result was for a retired load and dropped.
    pub fn finish_load(&mut self, ticket: &Ticket<PostId>, result: Result<Post, TransportError>) -> bool {
        if !self.guard.settle(ticket) {
            tracing::debug!(id = %ticket.key(), "dropping stale post");
            return false;
        }
        self.state = match result {
            Ok(post) => DetailState::Ready(post),
            Err(err) if err.is_not_found() => DetailState::NotFound,
            Err(_) => DetailState::Failed(LOAD_FAILED.to_string()),
        };
        true
    }

    pub fn unmount(&mut self) {
        self.guard.cancel();
        self.confirming = false;
    }

    /// Opens the confirmation gate. Only a loaded post can be deleted, and
    /// only once.
    pub fn request_delete(&mut self) {
        if matches!(self.state, DetailState::Ready(_)) && !self.deleting {
            self.confirming = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.confirming = false;
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// True between `begin_delete` and `finish_delete`.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Deletes the post once the user has confirmed. Returns the list route
    /// on success; on failure the view stays put with the gate reset.
    pub fn confirm_delete(&mut self) -> Option<Route> {
        let id = self.begin_delete()?;
        let result = self.access.remove(&id);
        self.finish_delete(result)
    }

    /// Starts deleting the shown post and returns its id. `None` unless the
    /// gate is open and no delete is already out.
    pub fn begin_delete(&mut self) -> Option<PostId> {
        if !self.confirming || self.deleting {
            return None;
        }
        self.deleting = true;
        Some(self.id.clone())
    }

    pub fn finish_delete(&mut self, result: Result<PostId, TransportError>) -> Option<Route> {
        if !self.deleting {
            tracing::debug!(id = %self.id, "dropping result for a delete that was never started");
            return None;
        }
        self.deleting = false;
        self.confirming = false;

        match result {
            Ok(removed) => {
                if removed == self.id {
                    self.state = DetailState::Deleted;
                }
                self.action_error = None;
                self.notifier.notify(Notification::success(DELETED));
                Some(Route::List)
            }
            Err(_) => {
                self.action_error = Some(DELETE_FAILED.to_string());
                self.notifier.notify(Notification::error(DELETE_FAILED));
                None
            }
        }
    }

    pub fn edit(&self) -> Route {
        Route::Edit(self.id.clone())
    }
}
