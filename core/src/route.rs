//! Screen paths the controllers hand back to the host.
//!
//! `/` is the list, `/posts/{id}` a single post, `/new` the create form and
//! `/edit/{id}` the edit form. Ids in paths are parsed with
//! `PostId::from(&str)`.

use std::fmt;

use crate::types::PostId;

/// Screens the host can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(PostId),
    New,
    Edit(PostId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/posts/{id}"),
            Route::New => "/new".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Some(Route::List),
            ["new"] => Some(Route::New),
            ["posts", id] if !id.is_empty() => Some(Route::Detail(PostId::from(*id))),
            ["edit", id] if !id.is_empty() => Some(Route::Edit(PostId::from(*id))),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
