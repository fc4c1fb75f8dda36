//! Protected admin surface. Every route here sits behind the JwtExtract
//! middleware (wired at the scope in `main`), so handlers can rely on claims
//! being present and use [`CurrentAdmin`] to resolve the live identity.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::CurrentAdmin;
use crate::routes::blogs::{BlogDto, CommentDto};
use crate::services;
use crate::services::blogs::BlogInput;
use crate::services::dashboard::DashboardStats;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeUser {
    name: String,
    email: String,
    role: String,
    is_registered: bool,
}

#[derive(Debug, Serialize)]
struct MeResponse {
    success: bool,
    user: MeUser,
}

async fn me(admin: CurrentAdmin) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MeResponse {
        success: true,
        user: MeUser {
            name: admin.name,
            email: admin.email,
            role: admin.role,
            is_registered: admin.is_registered,
        },
    }))
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    success: bool,
    stats: DashboardStats,
    #[serde(rename = "recentBlogs")]
    recent_blogs: Vec<BlogDto>,
    #[serde(rename = "recentComments")]
    recent_comments: Vec<CommentDto>,
}

async fn dashboard(
    admin: CurrentAdmin,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let data = services::dashboard::dashboard(&app_state, &admin.subject).await?;
    Ok(HttpResponse::Ok().json(DashboardResponse {
        success: true,
        stats: data.stats,
        recent_blogs: data.recent_blogs.into_iter().map(BlogDto::from).collect(),
        recent_comments: data
            .recent_comments
            .into_iter()
            .map(CommentDto::from)
            .collect(),
    }))
}

#[derive(Debug, Serialize)]
struct BlogListResponse {
    success: bool,
    blogs: Vec<BlogDto>,
}

async fn list_blogs(
    admin: CurrentAdmin,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let blogs = services::blogs::list_for_admin(&app_state, &admin.subject).await?;
    Ok(HttpResponse::Ok().json(BlogListResponse {
        success: true,
        blogs: blogs.into_iter().map(BlogDto::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBlogRequest {
    #[serde(default)]
    title: String,
    sub_title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    image: Option<String>,
    #[serde(default)]
    is_published: bool,
}

#[derive(Debug, Serialize)]
struct BlogResponse {
    success: bool,
    message: &'static str,
    blog: BlogDto,
}

async fn create_blog(
    admin: CurrentAdmin,
    req: web::Json<CreateBlogRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let blog = services::blogs::create_blog(
        &app_state,
        &admin.subject,
        BlogInput {
            title: req.title,
            subtitle: req.sub_title,
            description: req.description,
            category: req.category,
            image: req.image,
            is_published: req.is_published,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(BlogResponse {
        success: true,
        message: "Blog post created successfully",
        blog: BlogDto::from(blog),
    }))
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    success: bool,
    message: &'static str,
}

async fn delete_blog(
    admin: CurrentAdmin,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    services::blogs::delete_blog(&app_state, &admin.subject, &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: "Blog and associated comments deleted successfully",
    }))
}

async fn toggle_publish(
    admin: CurrentAdmin,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let blog = services::blogs::toggle_publish(&app_state, &admin.subject, &path).await?;
    let message = if blog.is_published {
        "Blog published successfully"
    } else {
        "Blog unpublished successfully"
    };
    Ok(HttpResponse::Ok().json(BlogResponse {
        success: true,
        message,
        blog: BlogDto::from(blog),
    }))
}

#[derive(Debug, Serialize)]
struct CommentListResponse {
    success: bool,
    comments: Vec<CommentDto>,
}

async fn list_comments(
    admin: CurrentAdmin,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comments = services::comments::list_for_admin(&app_state, &admin.subject).await?;
    Ok(HttpResponse::Ok().json(CommentListResponse {
        success: true,
        comments: comments.into_iter().map(CommentDto::from).collect(),
    }))
}

#[derive(Debug, Serialize)]
struct CommentResponse {
    success: bool,
    message: &'static str,
    comment: CommentDto,
}

async fn approve_comment(
    admin: CurrentAdmin,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comment = services::comments::approve_comment(&app_state, &admin.subject, &path).await?;
    Ok(HttpResponse::Ok().json(CommentResponse {
        success: true,
        message: "Comment approved successfully",
        comment: CommentDto::from(comment),
    }))
}

async fn delete_comment(
    admin: CurrentAdmin,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    services::comments::delete_comment(&app_state, &admin.subject, &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: "Comment deleted successfully",
    }))
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    prompt: Option<String>,
    topic: Option<String>,
    seed: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    subject: String,
    content: String,
}

/// Generate article HTML for the editor. Requires a configured generator;
/// when no subject is supplied one is proposed from the optional seed.
async fn generate(
    _admin: CurrentAdmin,
    req: web::Json<GenerateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let generator = app_state
        .generator
        .as_ref()
        .ok_or_else(AppError::ai_unavailable)?;

    let req = req.into_inner();
    let subject = match req
        .prompt
        .or(req.topic)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        Some(subject) => subject,
        None => generator.generate_topic(req.seed.as_deref().unwrap_or("")).await,
    };

    let content = generator.generate_article(&subject).await?;
    Ok(HttpResponse::Ok().json(GenerateResponse {
        success: true,
        subject,
        content,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me))
        .route("/dashboard", web::get().to(dashboard))
        .route("/blogs", web::get().to(list_blogs))
        .route("/blogs", web::post().to(create_blog))
        .route("/blogs/{id}", web::delete().to(delete_blog))
        .route("/blogs/{id}/toggle-publish", web::patch().to(toggle_publish))
        .route("/comments", web::get().to(list_comments))
        .route("/comments/{id}/approve", web::patch().to(approve_comment))
        .route("/comments/{id}", web::delete().to(delete_comment))
        .route("/generate", web::post().to(generate));
}
