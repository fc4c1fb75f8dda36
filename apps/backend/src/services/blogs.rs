//! Blog operations. Mutations follow the same shape everywhere: resolve the
//! resource first (missing -> 404), then check ownership (denied -> 403),
//! then act. Existence is never hidden behind an authorization failure.

use tracing::info;
use uuid::Uuid;

use crate::auth::policy::{owner_scope, require_owner, Subject};
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::{blogs, comments};
use crate::state::app_state::AppState;
use crate::trace_ctx;

pub use crate::repos::blogs::Blog;

#[derive(Debug, Clone)]
pub struct BlogInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub is_published: bool,
}

pub fn parse_blog_id(id: &str) -> Result<Uuid, AppError> {
    id.parse::<Uuid>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidBlogId, "Invalid blog ID"))
}

fn blog_not_found() -> AppError {
    AppError::not_found(ErrorCode::BlogNotFound, "Blog not found")
}

pub async fn create_blog(
    state: &AppState,
    subject: &Subject,
    input: BlogInput,
) -> Result<Blog, AppError> {
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.category.trim().is_empty()
    {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Title, description and category are required",
        ));
    }

    let db = require_db(state)?;
    let blog = blogs::create(
        db,
        blogs::NewBlog {
            title: input.title,
            subtitle: input.subtitle,
            description: input.description,
            category: input.category,
            image: input.image,
            author_id: subject.id().to_string(),
            is_published: input.is_published,
        },
    )
    .await?;

    info!(trace_id = %trace_ctx::trace_id(), blog_id = %blog.id, "blog created");
    Ok(blog)
}

/// Public listing: published blogs only.
pub async fn list_published(state: &AppState) -> Result<Vec<Blog>, AppError> {
    let db = require_db(state)?;
    Ok(blogs::list_published(db).await?)
}

/// Public read of a single blog. Drafts are reachable by direct id, matching
/// the preview behavior of the admin editor.
pub async fn get_blog(state: &AppState, id: &str) -> Result<Blog, AppError> {
    let blog_id = parse_blog_id(id)?;
    let db = require_db(state)?;
    blogs::find_by_id(db, blog_id)
        .await?
        .ok_or_else(blog_not_found)
}

/// Admin listing: everything in the subject's owner scope, drafts included.
pub async fn list_for_admin(state: &AppState, subject: &Subject) -> Result<Vec<Blog>, AppError> {
    let db = require_db(state)?;
    Ok(blogs::list_for_scope(db, &owner_scope(subject)).await?)
}

/// Delete a blog and every comment under it.
pub async fn delete_blog(state: &AppState, subject: &Subject, id: &str) -> Result<(), AppError> {
    let blog_id = parse_blog_id(id)?;
    let db = require_db(state)?;

    let blog = blogs::find_by_id(db, blog_id)
        .await?
        .ok_or_else(blog_not_found)?;
    require_owner(subject, blog.author_id.as_deref())?;

    let removed_comments = comments::delete_by_blog(db, blog_id).await?;
    blogs::delete(db, blog_id).await?;

    info!(
        trace_id = %trace_ctx::trace_id(),
        blog_id = %blog_id,
        removed_comments,
        "blog deleted"
    );
    Ok(())
}

/// Flip the published flag and return the updated blog.
pub async fn toggle_publish(
    state: &AppState,
    subject: &Subject,
    id: &str,
) -> Result<Blog, AppError> {
    let blog_id = parse_blog_id(id)?;
    let db = require_db(state)?;

    let blog = blogs::find_by_id(db, blog_id)
        .await?
        .ok_or_else(blog_not_found)?;
    require_owner(subject, blog.author_id.as_deref())?;

    let next = !blog.is_published;
    blogs::set_published(db, blog_id, next).await?;

    info!(trace_id = %trace_ctx::trace_id(), blog_id = %blog_id, is_published = next, "blog publish toggled");
    blogs::find_by_id(db, blog_id)
        .await?
        .ok_or_else(blog_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_blog_ids_are_rejected_before_any_lookup() {
        match parse_blog_id("not-a-uuid") {
            Err(AppError::BadRequest { code, .. }) => assert_eq!(code, ErrorCode::InvalidBlogId),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
