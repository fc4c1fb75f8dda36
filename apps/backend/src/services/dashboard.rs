//! Dashboard aggregates, computed inside the subject's owner scope. The
//! environment admin sees global numbers; a registered admin only counts
//! what it authored.

use serde::Serialize;

use crate::auth::policy::{owner_scope, Subject};
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::{blogs, comments};
use crate::repos::blogs::Blog;
use crate::repos::comments::Comment;
use crate::state::app_state::AppState;

const RECENT_LIMIT: u64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_blogs: u64,
    pub drafts: u64,
    pub published: u64,
    pub total_comments: u64,
}

#[derive(Debug)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_blogs: Vec<Blog>,
    pub recent_comments: Vec<Comment>,
}

pub async fn dashboard(state: &AppState, subject: &Subject) -> Result<Dashboard, AppError> {
    let db = require_db(state)?;
    let scope = owner_scope(subject);

    let total_blogs = blogs::count_for_scope(db, &scope, None).await?;
    let drafts = blogs::count_for_scope(db, &scope, Some(false)).await?;
    let published = blogs::count_for_scope(db, &scope, Some(true)).await?;

    let scoped_blog_ids = blogs::ids_for_scope(db, &scope).await?;
    let total_comments = comments::count_for_blog_ids(db, &scoped_blog_ids).await?;

    let recent_blogs = blogs::recent_for_scope(db, &scope, RECENT_LIMIT).await?;
    let recent_comments = comments::recent_for_blog_ids(db, &scoped_blog_ids, RECENT_LIMIT).await?;

    Ok(Dashboard {
        stats: DashboardStats {
            total_blogs,
            drafts,
            published,
            total_comments,
        },
        recent_blogs,
        recent_comments,
    })
}
