use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Schema,
};
use time::OffsetDateTime;

use super::entity::{self, ActiveModel, Column, Entity};
use super::{NewProject, Project, ProjectType, StoreError};

pub async fn create_table<C: ConnectionTrait>(db: &C) -> Result<(), StoreError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    owner_id: u64,
    project: NewProject,
) -> Result<Project, StoreError> {
    let model = ActiveModel {
        owner_id: Set(encode_owner(owner_id)),
        title: Set(project.title),
        description: Set(project.description),
        kind: Set(project.kind.as_str().to_owned()),
        url: Set(project.url),
        code_url: Set(project.code_url),
        image_url: Set(project.image_url),
        tags: Set(serde_json::json!(project.tags)),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::info!(id = model.id, owner_id, "added project");
    model.try_into()
}

/// Newest first
pub async fn list_by_owner<C: ConnectionTrait>(
    db: &C,
    owner_id: u64,
) -> Result<Vec<Project>, StoreError> {
    Entity::find()
        .filter(Column::OwnerId.eq(encode_owner(owner_id)))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Project::try_from)
        .collect()
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i64) -> Result<Project, StoreError> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound(id))?
        .try_into()
}

/// Only the owner may remove a project
pub async fn delete_owned<C: ConnectionTrait>(
    db: &C,
    owner_id: u64,
    id: i64,
) -> Result<Project, StoreError> {
    let project = find(db, id).await?;
    if project.owner_id != owner_id {
        return Err(StoreError::NotOwner(id));
    }
    Entity::delete_by_id(id).exec(db).await?;
    tracing::info!(id, owner_id, "removed project");
    Ok(project)
}

fn encode_owner(owner_id: u64) -> String {
    format!("{:x}", owner_id)
}

impl TryFrom<entity::Model> for Project {
    type Error = StoreError;

    fn try_from(model: entity::Model) -> Result<Self, Self::Error> {
        let id = model.id;
        let malformed = |reason: String| StoreError::Malformed { id, reason };
        let owner_id = u64::from_str_radix(&model.owner_id, 16)
            .map_err(|e| malformed(format!("owner id: {e}")))?;
        let kind = ProjectType::parse(&model.kind).map_err(|e| malformed(e.to_string()))?;
        let tags: Vec<String> = serde_json::from_value(model.tags)
            .map_err(|e| malformed(format!("tags: {e}")))?;

        Ok(Self {
            id,
            owner_id,
            title: model.title,
            description: model.description,
            kind,
            url: model.url,
            code_url: model.code_url,
            image_url: model.image_url,
            tags,
            created_at: model.created_at,
        })
    }
}
