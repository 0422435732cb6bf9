//! Per-screen controllers.
//!
//! Each controller owns its loading/error/data state and talks to the
//! access layer on mount and on user actions. Loads go through a
//! `FetchGuard` so a result for a screen the user already left is dropped.
//! Controllers return the `Route` to navigate to; the host navigates.

pub mod detail;
pub mod form;
pub mod list;

pub use detail::{DetailState, DetailView};
pub use form::{FormError, FormMode, FormView, Submission};
pub use list::{ListScreen, ListState, ListView};
