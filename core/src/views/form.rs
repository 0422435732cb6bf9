//! Create and edit screens.
//!
//! One controller serves both; the host picks the mode from the route.
//! Loading and submitting are split into `begin_*`/`finish_*` halves so a
//! host that runs the call elsewhere can keep the form up in between.
//! `mount` and `submit` run both halves inline.

use std::fmt;

use crate::access::PostAccess;
use crate::error::{TransportError, ValidationError};
use crate::fetch::{FetchGuard, Ticket};
use crate::route::Route;
use crate::types::{Post, PostDraft, PostId, Saved};

pub const BLANK_FIELDS: &str = "Please enter both a title and content.";
pub const LOAD_FAILED: &str = "Failed to load post.";
pub const NOT_FOUND: &str = "Post not found.";
pub const CREATE_FAILED: &str = "Failed to create post.";
pub const UPDATE_FAILED: &str = "Failed to update post.";

/// Chosen by the host from the route, never inferred from the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PostId),
}

impl FormMode {
    pub fn from_route(route: &Route) -> Option<FormMode> {
        match route {
            Route::New => Some(FormMode::Create),
            Route::Edit(id) => Some(FormMode::Edit(id.clone())),
            _ => None,
        }
    }
}

/// Inline error shown above the form. `message()` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Blank title or content; nothing was sent.
    Validation(ValidationError),
    /// The post to edit could not be fetched.
    Load(String),
    /// Create or update was rejected or never reached the server.
    Submit(String),
}

impl FormError {
    pub fn message(&self) -> &str {
        match self {
            FormError::Validation(_) => BLANK_FIELDS,
            FormError::Load(message) | FormError::Submit(message) => message.as_str(),
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A validated, trimmed draft handed out by `FormView::begin_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(PostDraft),
    Update(PostId, PostDraft),
}

impl Submission {
    /// Performs the create or update this submission stands for.
    pub fn send<A: PostAccess + ?Sized>(&self, access: &A) -> Result<Saved, TransportError> {
        match self {
            Submission::Create(draft) => access.create(draft),
            Submission::Update(id, draft) => access.update(id, draft),
        }
    }

    /// Where to go once the server accepted it.
    pub fn route(&self) -> Route {
        match self {
            Submission::Create(_) => Route::List,
            Submission::Update(id, _) => Route::Detail(id.clone()),
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            Submission::Create(_) => CREATE_FAILED,
            Submission::Update(..) => UPDATE_FAILED,
        }
    }
}

/// Controller shared by the create and edit screens.
#[derive(Debug)]
pub struct FormView<A> {
    access: A,
    mode: FormMode,
    draft: PostDraft,
    loading: bool,
    submitting: bool,
    error: Option<FormError>,
    guard: FetchGuard<PostId>,
}

impl<A: PostAccess> FormView<A> {
    pub fn new(access: A, mode: FormMode) -> Self {
        Self {
            access,
            mode,
            draft: PostDraft::default(),
            loading: false,
            submitting: false,
            error: None,
            guard: FetchGuard::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True between `begin_submit` and `finish_submit`.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// In edit mode, fetches the post and seeds the draft from it. Create
    /// mode starts blank and needs nothing.
    pub fn mount(&mut self) {
        if let Some(ticket) = self.begin_load() {
            let result = self.access.get(ticket.key());
            self.finish_load(&ticket, result);
        }
    }

    /// Starts loading the post being edited. `None` in create mode.
    pub fn begin_load(&mut self) -> Option<Ticket<PostId>> {
        match &self.mode {
            FormMode::Create => {
                self.guard.cancel();
                None
            }
            FormMode::Edit(id) => {
                self.loading = true;
                self.error = None;
                Some(self.guard.begin(id.clone()))
            }
        }
    }

    /// Returns `false` when the result was for a retired load and dropped.
    pub fn finish_load(&mut self, ticket: &Ticket<PostId>, result: Result<Post, TransportError>) -> bool {
        if !self.guard.settle(ticket) {
            tracing::debug!(id = %ticket.key(), "dropping stale form load");
            return false;
        }
        self.loading = false;
        match result {
            Ok(post) => self.draft = PostDraft::from(&post),
            Err(err) if err.is_not_found() => self.error = Some(FormError::Load(NOT_FOUND.to_string())),
            Err(_) => self.error = Some(FormError::Load(LOAD_FAILED.to_string())),
        }
        true
    }

    /// Switches mode, e.g. when the route changes under a mounted form, and
    /// reloads.
    pub fn switch_mode(&mut self, mode: FormMode) {
        self.mode = mode;
        self.draft = PostDraft::default();
        self.error = None;
        self.loading = false;
        self.mount();
    }

    pub fn unmount(&mut self) {
        self.guard.cancel();
        self.loading = false;
    }

    /// Validates and submits the draft. Returns where to navigate on
    /// success; `None` means the form stays up with `error()` set and the
    /// draft untouched.
    pub fn submit(&mut self) -> Option<Route> {
        let submission = self.begin_submit()?;
        let result = submission.send(&self.access);
        self.finish_submit(&submission, result)
    }

    /// Validates the draft and marks the form as submitting. `None` while
    /// a load or another submit is in flight, or when validation fails, in
    /// which case `error()` says why and nothing must be sent.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.loading || self.submitting {
            return None;
        }
        let draft = match self.draft.validate() {
            Ok(draft) => draft,
            Err(err) => {
                self.error = Some(FormError::Validation(err));
                return None;
            }
        };

        self.submitting = true;
        self.error = None;
        Some(match &self.mode {
            FormMode::Create => Submission::Create(draft),
            FormMode::Edit(id) => Submission::Update(id.clone(), draft),
        })
    }

    /// Applies the server's answer to `submission`. The draft is kept on
    /// failure so the user can retry.
    pub fn finish_submit(
        &mut self,
        submission: &Submission,
        result: Result<Saved, TransportError>,
    ) -> Option<Route> {
        if !self.submitting {
            tracing::debug!("dropping result for a submit that was never started");
            return None;
        }
        self.submitting = false;
        match result {
            Ok(_) => Some(submission.route()),
            Err(_) => {
                self.error = Some(FormError::Submit(submission.failure().to_string()));
                None
            }
        }
    }

    /// Leaves the form without saving.
    pub fn cancel(&mut self) -> Route {
        self.unmount();
        match &self.mode {
            FormMode::Create => Route::List,
            FormMode::Edit(id) => Route::Detail(id.clone()),
        }
    }
}
