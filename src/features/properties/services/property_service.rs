use std::sync::Arc;

use async_trait::async_trait;
use qrcode::EcLevel;
use validator::Validate;

use crate::core::error::{map_error, ServiceError, ServiceResult};
use crate::features::groups::GroupRepository;
use crate::features::properties::dtos::PropertyPayloadDto;
use crate::features::properties::models::{Property, PropertyUpdate};
use crate::features::properties::repositories::PropertyRepository;
use crate::shared::constants::QR_CODE_SIZE;
use crate::shared::generators::{IdGenerator, QrCodeGenerator};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Add a property to an existing group, returning the new property id
    async fn create(&self, group_id: String, payload: PropertyPayloadDto) -> ServiceResult<String>;

    async fn update(&self, id: String, payload: PropertyPayloadDto) -> ServiceResult<()>;

    async fn delete(&self, id: String) -> ServiceResult<()>;

    /// PNG QR code encoding the property id
    async fn generate_qr_code(&self, id: String) -> ServiceResult<Vec<u8>>;
}

pub struct PropertyServiceImpl {
    property_repository: Arc<dyn PropertyRepository>,
    group_repository: Arc<dyn GroupRepository>,
    id_generator: Arc<dyn IdGenerator>,
    qr_code_generator: Arc<dyn QrCodeGenerator>,
}

impl PropertyServiceImpl {
    pub fn new(
        property_repository: Arc<dyn PropertyRepository>,
        group_repository: Arc<dyn GroupRepository>,
        id_generator: Arc<dyn IdGenerator>,
        qr_code_generator: Arc<dyn QrCodeGenerator>,
    ) -> Self {
        Self {
            property_repository,
            group_repository,
            id_generator,
            qr_code_generator,
        }
    }
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    async fn create(&self, group_id: String, payload: PropertyPayloadDto) -> ServiceResult<String> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        self.group_repository
            .find_by_id(&group_id)
            .await
            .map_err(map_error)?;

        let id = self
            .id_generator
            .generate_property_id()
            .map_err(map_error)?;

        let property = Property {
            id,
            group_id,
            name: payload.name,
            description: payload.description,
            amount: i32::from(payload.amount),
        };
        self.property_repository
            .insert(&property)
            .await
            .map_err(map_error)?;

        Ok(property.id)
    }

    async fn update(&self, id: String, payload: PropertyPayloadDto) -> ServiceResult<()> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let update = PropertyUpdate {
            name: payload.name,
            description: payload.description,
            amount: i32::from(payload.amount),
        };
        self.property_repository
            .update(&id, &update)
            .await
            .map_err(map_error)
    }

    async fn delete(&self, id: String) -> ServiceResult<()> {
        self.property_repository
            .delete(&id)
            .await
            .map_err(map_error)
    }

    async fn generate_qr_code(&self, id: String) -> ServiceResult<Vec<u8>> {
        let property = self
            .property_repository
            .find_by_id(&id)
            .await
            .map_err(map_error)?;

        let qr = Arc::clone(&self.qr_code_generator);
        tokio::task::spawn_blocking(move || qr.generate(&property.id, EcLevel::M, QR_CODE_SIZE))
            .await
            .map_err(map_error)?
            .map_err(map_error)
    }
}
