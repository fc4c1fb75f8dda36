//! Blog repository. All write paths leave ownership checks to the service
//! layer; functions here only touch rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::policy::OwnerScope;
use crate::entities::blogs;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub author_id: Option<String>,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<blogs::Model> for Blog {
    fn from(model: blogs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            subtitle: model.subtitle,
            description: model.description,
            category: model.category,
            image: model.image,
            author_id: model.author_id,
            is_published: model.is_published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields supplied when creating a blog. The author id is the creating
/// subject's id and is recorded verbatim.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub author_id: String,
    pub is_published: bool,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_blog: NewBlog,
) -> Result<Blog, DomainError> {
    let now = OffsetDateTime::now_utc();
    let model = blogs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(new_blog.title),
        subtitle: Set(new_blog.subtitle),
        description: Set(new_blog.description),
        category: Set(new_blog.category),
        image: Set(new_blog.image),
        author_id: Set(Some(new_blog.author_id)),
        is_published: Set(new_blog.is_published),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(conn).await.map_err(map_db_err)?;
    Ok(Blog::from(created))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Blog>, DomainError> {
    let blog = blogs::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(blog.map(Blog::from))
}

/// Published blogs only, newest first. This is the public listing.
pub async fn list_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Blog>, DomainError> {
    let rows = blogs::Entity::find()
        .filter(blogs::Column::IsPublished.eq(true))
        .order_by_desc(blogs::Column::CreatedAt)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows.into_iter().map(Blog::from).collect())
}

fn scoped_query(scope: &OwnerScope) -> sea_orm::Select<blogs::Entity> {
    match scope {
        OwnerScope::Global => blogs::Entity::find(),
        OwnerScope::Owned(author_id) => {
            blogs::Entity::find().filter(blogs::Column::AuthorId.eq(author_id.as_str()))
        }
    }
}

/// Every blog visible inside the owner scope, drafts included, newest first.
pub async fn list_for_scope<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scope: &OwnerScope,
) -> Result<Vec<Blog>, DomainError> {
    let rows = scoped_query(scope)
        .order_by_desc(blogs::Column::CreatedAt)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows.into_iter().map(Blog::from).collect())
}

pub async fn recent_for_scope<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scope: &OwnerScope,
    limit: u64,
) -> Result<Vec<Blog>, DomainError> {
    let rows = scoped_query(scope)
        .order_by_desc(blogs::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows.into_iter().map(Blog::from).collect())
}

pub async fn count_for_scope<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scope: &OwnerScope,
    published: Option<bool>,
) -> Result<u64, DomainError> {
    let mut query = scoped_query(scope);
    if let Some(published) = published {
        query = query.filter(blogs::Column::IsPublished.eq(published));
    }
    query.count(conn).await.map_err(map_db_err)
}

/// Ids of every blog inside the owner scope. Used to scope comment queries
/// through the parent relationship.
pub async fn ids_for_scope<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scope: &OwnerScope,
) -> Result<Vec<Uuid>, DomainError> {
    let rows = scoped_query(scope)
        .select_only()
        .column(blogs::Column::Id)
        .into_tuple::<Uuid>()
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(rows)
}

pub async fn set_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    is_published: bool,
) -> Result<(), DomainError> {
    let model = blogs::ActiveModel {
        id: Set(id),
        is_published: Set(is_published),
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
    blogs::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}
