//! Public blog surface: published listings, single reads, and comment
//! submission. No authentication anywhere on these routes.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::blogs::Blog;
use crate::repos::comments::Comment;
use crate::services;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDto {
    pub id: Uuid,
    pub title: String,
    pub sub_title: Option<String>,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub author: Option<String>,
    pub is_published: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Blog> for BlogDto {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            sub_title: blog.subtitle,
            description: blog.description,
            category: blog.category,
            image: blog.image,
            author: blog.author_id,
            is_published: blog.is_published,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub name: String,
    pub content: String,
    pub is_approved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            blog_id: comment.blog_id,
            name: comment.name,
            content: comment.content,
            is_approved: comment.is_approved,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct BlogListResponse {
    success: bool,
    blogs: Vec<BlogDto>,
}

#[derive(Debug, Serialize)]
struct BlogResponse {
    success: bool,
    blog: BlogDto,
}

#[derive(Debug, Serialize)]
struct CommentListResponse {
    success: bool,
    comments: Vec<CommentDto>,
}

async fn list_blogs(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let blogs = services::blogs::list_published(&app_state).await?;
    Ok(HttpResponse::Ok().json(BlogListResponse {
        success: true,
        blogs: blogs.into_iter().map(BlogDto::from).collect(),
    }))
}

async fn get_blog(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let blog = services::blogs::get_blog(&app_state, &path).await?;
    Ok(HttpResponse::Ok().json(BlogResponse {
        success: true,
        blog: BlogDto::from(blog),
    }))
}

async fn list_comments(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comments = services::comments::list_approved(&app_state, &path).await?;
    Ok(HttpResponse::Ok().json(CommentListResponse {
        success: true,
        comments: comments.into_iter().map(CommentDto::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct AddCommentRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct AddCommentResponse {
    success: bool,
    message: &'static str,
    comment: CommentDto,
}

async fn add_comment(
    path: web::Path<String>,
    req: web::Json<AddCommentRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comment = services::comments::add_comment(&app_state, &path, &req.name, &req.content).await?;
    Ok(HttpResponse::Created().json(AddCommentResponse {
        success: true,
        message: "Comment submitted for review",
        comment: CommentDto::from(comment),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/blogs")
            .route("", web::get().to(list_blogs))
            .route("/{id}", web::get().to(get_blog))
            .route("/{id}/comments", web::get().to(list_comments))
            .route("/{id}/comments", web::post().to(add_comment)),
    );
}
