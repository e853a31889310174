//! Askama templates for the Murmur web interface

use askama::Template;
use chrono::{DateTime, TimeZone, Utc};
use murmur::{BoardConfig, FrontPage, ThreadPage};
use murmur_core::Post;

/// A post prepared for display
#[derive(Debug)]
pub struct PostView {
    pub id: i64,
    /// Thread the post belongs to (its own id for openers)
    pub thread: i64,
    /// Base64 author digest, empty if the post has none
    pub author: String,
    /// Written from the thread opener's address
    pub is_op: bool,
    pub body: String,
    /// "5 minutes ago"
    pub posted: String,
    /// RFC 3339 timestamp for the `datetime` attribute
    pub posted_iso: String,
}

impl PostView {
    pub fn new(post: &Post, is_op: bool, now: DateTime<Utc>) -> Self {
        let posted_at = Utc.timestamp_millis_opt(post.posted_at).single();
        Self {
            id: post.id.get(),
            thread: post.thread_id().get(),
            author: post.author.map(|a| a.to_base64()).unwrap_or_default(),
            is_op,
            body: post.body.clone(),
            posted: posted_at
                .map(|t| relative_time(t, now))
                .unwrap_or_default(),
            posted_iso: posted_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        }
    }
}

/// Front page template
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_name: String,
    pub slogan: String,
    pub threads: Vec<PostView>,
    pub ticket: String,
}

impl IndexTemplate {
    pub fn new(config: &BoardConfig, page: &FrontPage, now: DateTime<Utc>) -> Self {
        Self {
            site_name: config.site_name.clone(),
            slogan: config.slogan.clone(),
            threads: page
                .threads
                .iter()
                .map(|p| PostView::new(p, false, now))
                .collect(),
            ticket: page.ticket.to_base64(),
        }
    }
}

/// Thread page template
#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadTemplate {
    pub site_name: String,
    pub slogan: String,
    pub thread_id: i64,
    /// Opener first, then replies in id order
    pub posts: Vec<PostView>,
    pub ticket: String,
}

impl ThreadTemplate {
    pub fn new(config: &BoardConfig, page: &ThreadPage, now: DateTime<Utc>) -> Self {
        let posts = std::iter::once(PostView::new(&page.thread, true, now))
            .chain(
                page.replies
                    .iter()
                    .map(|p| PostView::new(p, page.is_opener(p), now)),
            )
            .collect();

        Self {
            site_name: config.site_name.clone(),
            slogan: config.slogan.clone(),
            thread_id: page.thread.id.get(),
            posts,
            ticket: page.ticket.to_base64(),
        }
    }
}

/// English description of how long before `now` the instant `then` was.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);

    if delta.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let (amount, unit) = if delta.num_seconds() < 60 {
        return "just now".to_string();
    } else if delta.num_minutes() < 60 {
        (delta.num_minutes(), "minute")
    } else if delta.num_hours() < 24 {
        (delta.num_hours(), "hour")
    } else if delta.num_days() < 30 {
        (delta.num_days(), "day")
    } else if delta.num_days() < 365 {
        (delta.num_days() / 30, "month")
    } else {
        (delta.num_days() / 365, "year")
    };

    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}
