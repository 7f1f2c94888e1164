use async_trait::async_trait;
use reqwest::StatusCode;

use crate::core::config::AdministrativeAreaConfig;
use crate::core::error::{RepositoryError, RepositoryResult};
use crate::features::villages::models::{Village, VillageEnvelope};
use crate::modules::logging::ErrorLogger;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VillageRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Village>;
}

/// Village lookup against the administrative-area HTTP service
pub struct HttpVillageRepository {
    http_client: reqwest::Client,
    base_url: String,
    logger: ErrorLogger,
}

impl HttpVillageRepository {
    pub fn new(
        config: &AdministrativeAreaConfig,
        logger: ErrorLogger,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            logger,
        })
    }

    fn unexpected(&self, message: String) -> RepositoryError {
        tracing::error!("{}", message);
        self.logger.error(message);
        RepositoryError::Database
    }
}

#[async_trait]
impl VillageRepository for HttpVillageRepository {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Village> {
        let url = format!("{}/villages/{}", self.base_url, urlencoding::encode(id));
        tracing::debug!("Fetching village: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unexpected(format!("Failed to fetch village {}: {}", id, e)))?;

        match response.status() {
            StatusCode::OK => {
                let envelope = response.json::<VillageEnvelope>().await.map_err(|e| {
                    self.unexpected(format!("Failed to parse village response: {}", e))
                })?;
                Ok(envelope.data)
            }
            StatusCode::NOT_FOUND => Err(RepositoryError::RecordNotFound),
            status => Err(self.unexpected(format!(
                "Administrative-area service returned HTTP {} for village {}",
                status, id
            ))),
        }
    }
}
