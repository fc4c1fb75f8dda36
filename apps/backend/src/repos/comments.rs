//! Comment repository. Comments have no owner of their own; scoped queries
//! go through the ids of the parent blogs.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::comments;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub name: String,
    pub content: String,
    pub is_approved: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<comments::Model> for Comment {
    fn from(model: comments::Model) -> Self {
        Self {
            id: model.id,
            blog_id: model.blog_id,
            name: model.name,
            content: model.content,
            is_approved: model.is_approved,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Public submissions land unapproved and stay invisible until moderated.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blog_id: Uuid,
    name: &str,
    content: &str,
) -> Result<Comment, DomainError> {
    let now = OffsetDateTime::now_utc();
    let model = comments::ActiveModel {
        id: Set(Uuid::new_v4()),
        blog_id: Set(blog_id),
        name: Set(name.to_string()),
        content: Set(content.to_string()),
        is_approved: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(conn).await.map_err(map_db_err)?;
    Ok(Comment::from(created))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Comment>, DomainError> {
    let comment = comments::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(comment.map(Comment::from))
}

pub async fn list_approved_for_blog<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blog_id: Uuid,
) -> Result<Vec<Comment>, DomainError> {
    let rows = comments::Entity::find()
        .filter(comments::Column::BlogId.eq(blog_id))
        .filter(comments::Column::IsApproved.eq(true))
        .order_by_desc(comments::Column::CreatedAt)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

pub async fn list_for_blog_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blog_ids: &[Uuid],
) -> Result<Vec<Comment>, DomainError> {
    if blog_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = comments::Entity::find()
        .filter(comments::Column::BlogId.is_in(blog_ids.iter().copied()))
        .order_by_desc(comments::Column::CreatedAt)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

pub async fn recent_for_blog_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blog_ids: &[Uuid],
    limit: u64,
) -> Result<Vec<Comment>, DomainError> {
    if blog_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = comments::Entity::find()
        .filter(comments::Column::BlogId.is_in(blog_ids.iter().copied()))
        .order_by_desc(comments::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

pub async fn count_for_blog_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blog_ids: &[Uuid],
) -> Result<u64, DomainError> {
    if blog_ids.is_empty() {
        return Ok(0);
    }
    comments::Entity::find()
        .filter(comments::Column::BlogId.is_in(blog_ids.iter().copied()))
        .count(conn)
        .await
        .map_err(map_db_err)
}

pub async fn set_approved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    is_approved: bool,
) -> Result<(), DomainError> {
    let model = comments::ActiveModel {
        id: Set(id),
        is_approved: Set(is_approved),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    model.update(conn).await.map_err(map_db_err)?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<(), DomainError> {
    comments::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

/// Remove every comment under a blog. Called before the blog row itself is
/// deleted so no orphans survive on engines without enforced FKs.
pub async fn delete_by_blog<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    blog_id: Uuid,
) -> Result<u64, DomainError> {
    let result = comments::Entity::delete_many()
        .filter(comments::Column::BlogId.eq(blog_id))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(result.rows_affected)
}
