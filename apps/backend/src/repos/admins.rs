//! Admin credential-store repository (generic over ConnectionTrait).

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::admins;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Admin domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_registered: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<admins::Model> for Admin {
    fn from(model: admins::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role,
            is_registered: model.is_registered,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<Admin>, DomainError> {
    let admin = admins::Entity::find()
        .filter(admins::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(admin.map(Admin::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Admin>, DomainError> {
    let admin = admins::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(admin.map(Admin::from))
}

/// Create a fresh admin record. New admins start unregistered with the
/// default "admin" role; email is expected to be normalized by the caller.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Admin, DomainError> {
    let now = OffsetDateTime::now_utc();
    let model = admins::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set("admin".to_string()),
        is_registered: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(conn).await.map_err(map_db_err)?;
    Ok(Admin::from(created))
}
