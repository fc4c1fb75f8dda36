//! Comment operations. A comment's ownership is transitively its parent
//! blog's, so moderation resolves the comment, then the parent blog, then
//! checks the blog's author. Each missing link gets its own 404 before any
//! 403 can be produced.

use tracing::info;
use uuid::Uuid;

use crate::auth::policy::{owner_scope, require_owner, Subject};
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::{blogs, comments};
use crate::services::blogs::parse_blog_id;
use crate::state::app_state::AppState;
use crate::trace_ctx;

pub use crate::repos::comments::Comment;

pub fn parse_comment_id(id: &str) -> Result<Uuid, AppError> {
    id.parse::<Uuid>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidCommentId, "Invalid comment ID"))
}

fn comment_not_found() -> AppError {
    AppError::not_found(ErrorCode::CommentNotFound, "Comment not found")
}

fn parent_blog_not_found() -> AppError {
    AppError::not_found(ErrorCode::BlogNotFound, "Associated blog not found")
}

/// Public submission. The new comment is unapproved and invisible until a
/// moderator approves it.
pub async fn add_comment(
    state: &AppState,
    blog_id: &str,
    name: &str,
    content: &str,
) -> Result<Comment, AppError> {
    if name.trim().is_empty() || content.trim().is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Name and content are required",
        ));
    }

    let blog_id = parse_blog_id(blog_id)?;
    let db = require_db(state)?;

    if blogs::find_by_id(db, blog_id).await?.is_none() {
        return Err(AppError::not_found(ErrorCode::BlogNotFound, "Blog not found"));
    }

    let comment = comments::create(db, blog_id, name.trim(), content.trim()).await?;
    info!(trace_id = %trace_ctx::trace_id(), blog_id = %blog_id, comment_id = %comment.id, "comment submitted");
    Ok(comment)
}

/// Public listing: approved comments for a blog, newest first.
pub async fn list_approved(state: &AppState, blog_id: &str) -> Result<Vec<Comment>, AppError> {
    let blog_id = parse_blog_id(blog_id)?;
    let db = require_db(state)?;
    Ok(comments::list_approved_for_blog(db, blog_id).await?)
}

/// Admin moderation queue: every comment under blogs in the subject's owner
/// scope, approved or not.
pub async fn list_for_admin(state: &AppState, subject: &Subject) -> Result<Vec<Comment>, AppError> {
    let db = require_db(state)?;
    let blog_ids = blogs::ids_for_scope(db, &owner_scope(subject)).await?;
    Ok(comments::list_for_blog_ids(db, &blog_ids).await?)
}

async fn resolve_for_moderation(
    state: &AppState,
    subject: &Subject,
    id: &str,
) -> Result<Comment, AppError> {
    let comment_id = parse_comment_id(id)?;
    let db = require_db(state)?;

    let comment = comments::find_by_id(db, comment_id)
        .await?
        .ok_or_else(comment_not_found)?;
    let blog = blogs::find_by_id(db, comment.blog_id)
        .await?
        .ok_or_else(parent_blog_not_found)?;
    require_owner(subject, blog.author_id.as_deref())?;

    Ok(comment)
}

pub async fn approve_comment(
    state: &AppState,
    subject: &Subject,
    id: &str,
) -> Result<Comment, AppError> {
    let comment = resolve_for_moderation(state, subject, id).await?;
    let db = require_db(state)?;
    comments::set_approved(db, comment.id, true).await?;

    info!(trace_id = %trace_ctx::trace_id(), comment_id = %comment.id, "comment approved");
    comments::find_by_id(db, comment.id)
        .await?
        .ok_or_else(comment_not_found)
}

pub async fn delete_comment(state: &AppState, subject: &Subject, id: &str) -> Result<(), AppError> {
    let comment = resolve_for_moderation(state, subject, id).await?;
    let db = require_db(state)?;
    comments::delete(db, comment.id).await?;

    info!(trace_id = %trace_ctx::trace_id(), comment_id = %comment.id, "comment deleted");
    Ok(())
}
