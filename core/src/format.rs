//! Human-readable timestamps for the list and detail screens.
//!
//! Rendering happens in whatever timezone the caller converts to. A post
//! without `createdAt` renders no date at all.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::types::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "May 1, 2024", for list rows.
    Date,
    /// "May 1, 2024 10:05", for the detail page.
    DateTime,
}

/// Renders a timestamp in the caller's timezone.
pub fn format_timestamp<Tz>(ts: &DateTime<Tz>, style: DateStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = match style {
        DateStyle::Date => "%B %-d, %Y",
        DateStyle::DateTime => "%B %-d, %Y %H:%M",
    };
    ts.format(pattern).to_string()
}

/// Renders when `post` was created, in `tz`. `None` when the server sent no
/// timestamp, in which case the date line is left out.
pub fn format_created_at<Tz>(post: &Post, tz: &Tz, style: DateStyle) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    post.created_at.map(|ts| format_timestamp(&ts.with_timezone(tz), style))
}
