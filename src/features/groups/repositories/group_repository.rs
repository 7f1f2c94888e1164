use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::core::database::{database_error, ensure_rows_affected, insert_error, lookup_error};
use crate::core::error::RepositoryResult;
use crate::features::addresses::models::Address;
use crate::features::groups::models::{Group, GroupUpdate};
use crate::features::properties::models::Property;
use crate::modules::logging::ErrorLogger;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Persist a group together with its address
    async fn insert(&self, group: &Group) -> RepositoryResult<()>;

    async fn find_all(&self) -> RepositoryResult<Vec<Group>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Group>;

    async fn update(&self, id: &str, group: &GroupUpdate) -> RepositoryResult<()>;

    /// Soft-delete a group, its address and all of its properties
    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

/// A group row joined with its address
#[derive(Debug, FromRow)]
struct GroupRow {
    id: String,
    name: String,
    leader: String,
    address: String,
    village_id: String,
    village_name: String,
    district_id: String,
    district_name: String,
    regency_id: String,
    regency_name: String,
    province_id: String,
    province_name: String,
}

impl GroupRow {
    fn into_group(self, properties: Vec<Property>) -> Group {
        Group {
            address: Address {
                id: self.id.clone(),
                address: self.address,
                village_id: self.village_id,
                village_name: self.village_name,
                district_id: self.district_id,
                district_name: self.district_name,
                regency_id: self.regency_id,
                regency_name: self.regency_name,
                province_id: self.province_id,
                province_name: self.province_name,
            },
            id: self.id,
            name: self.name,
            leader: self.leader,
            properties,
        }
    }
}

const SELECT_GROUPS: &str = r#"
    SELECT g.id, g.name, g.leader,
           a.address, a.village_id, a.village_name, a.district_id, a.district_name,
           a.regency_id, a.regency_name, a.province_id, a.province_name
    FROM groups g
    JOIN addresses a ON a.id = g.id AND a.deleted_at IS NULL
    WHERE g.deleted_at IS NULL
"#;

pub struct PgGroupRepository {
    pool: PgPool,
    logger: ErrorLogger,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool, logger: ErrorLogger) -> Self {
        Self { pool, logger }
    }

    async fn find_properties(&self, group_ids: &[String]) -> RepositoryResult<Vec<Property>> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT id, group_id, name, description, amount
            FROM properties
            WHERE group_id = ANY($1) AND deleted_at IS NULL
            ORDER BY created_at
            "#,
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "list group properties", e))
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn insert(&self, group: &Group) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error(&self.logger, "begin group insert", e))?;

        sqlx::query("INSERT INTO groups (id, name, leader) VALUES ($1, $2, $3)")
            .bind(&group.id)
            .bind(&group.name)
            .bind(&group.leader)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(&self.logger, "insert group", e))?;

        let address = &group.address;
        sqlx::query(
            r#"
            INSERT INTO addresses (
                id, address, village_id, village_name, district_id, district_name,
                regency_id, regency_name, province_id, province_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&group.id)
        .bind(&address.address)
        .bind(&address.village_id)
        .bind(&address.village_name)
        .bind(&address.district_id)
        .bind(&address.district_name)
        .bind(&address.regency_id)
        .bind(&address.regency_name)
        .bind(&address.province_id)
        .bind(&address.province_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| insert_error(&self.logger, "insert group address", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error(&self.logger, "commit group insert", e))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Group>> {
        let rows = sqlx::query_as::<_, GroupRow>(&format!("{SELECT_GROUPS} ORDER BY g.created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error(&self.logger, "list groups", e))?;

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut properties_by_group: HashMap<String, Vec<Property>> = HashMap::new();
        if !ids.is_empty() {
            for property in self.find_properties(&ids).await? {
                properties_by_group
                    .entry(property.group_id.clone())
                    .or_default()
                    .push(property);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let properties = properties_by_group.remove(&row.id).unwrap_or_default();
                row.into_group(properties)
            })
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Group> {
        let row = sqlx::query_as::<_, GroupRow>(&format!("{SELECT_GROUPS} AND g.id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| lookup_error(&self.logger, "find group", e))?;

        let properties = self.find_properties(&[row.id.clone()]).await?;
        Ok(row.into_group(properties))
    }

    async fn update(&self, id: &str, group: &GroupUpdate) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET name = $2, leader = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(&group.name)
        .bind(&group.leader)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "update group", e))?;

        ensure_rows_affected(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error(&self.logger, "begin group delete", e))?;

        let result = sqlx::query(
            "UPDATE groups SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error(&self.logger, "delete group", e))?;

        // Dropping the transaction rolls it back
        ensure_rows_affected(result.rows_affected())?;

        sqlx::query("UPDATE addresses SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error(&self.logger, "delete group address", e))?;

        sqlx::query(
            "UPDATE properties SET deleted_at = NOW() WHERE group_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error(&self.logger, "delete group properties", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error(&self.logger, "commit group delete", e))
    }
}
