use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{database_error, ensure_rows_affected};
use crate::core::error::RepositoryResult;
use crate::features::addresses::models::Address;
use crate::modules::logging::ErrorLogger;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Replace the address line and village snapshot of `address.id`
    async fn update(&self, address: &Address) -> RepositoryResult<()>;
}

pub struct PgAddressRepository {
    pool: PgPool,
    logger: ErrorLogger,
}

impl PgAddressRepository {
    pub fn new(pool: PgPool, logger: ErrorLogger) -> Self {
        Self { pool, logger }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn update(&self, address: &Address) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE addresses
            SET address = $2,
                village_id = $3, village_name = $4,
                district_id = $5, district_name = $6,
                regency_id = $7, regency_name = $8,
                province_id = $9, province_name = $10,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(&address.id)
        .bind(&address.address)
        .bind(&address.village_id)
        .bind(&address.village_name)
        .bind(&address.district_id)
        .bind(&address.district_name)
        .bind(&address.regency_id)
        .bind(&address.regency_name)
        .bind(&address.province_id)
        .bind(&address.province_name)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&self.logger, "update address", e))?;

        ensure_rows_affected(result.rows_affected())
    }
}
