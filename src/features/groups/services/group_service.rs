use std::sync::Arc;

use async_trait::async_trait;
use qrcode::EcLevel;
use validator::Validate;

use crate::core::error::{map_error, ServiceError, ServiceResult};
use crate::features::addresses::models::Address;
use crate::features::groups::dtos::{CreateGroupDto, GroupDto, UpdateGroupDto};
use crate::features::groups::models::{Group, GroupUpdate};
use crate::features::groups::repositories::GroupRepository;
use crate::features::villages::VillageRepository;
use crate::shared::constants::QR_CODE_SIZE;
use crate::shared::generators::{IdGenerator, QrCodeGenerator};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Register a group and its address, returning the new group id
    async fn create(&self, payload: CreateGroupDto) -> ServiceResult<String>;

    async fn get_all(&self) -> ServiceResult<Vec<GroupDto>>;

    async fn get_by_id(&self, id: String) -> ServiceResult<GroupDto>;

    async fn update(&self, id: String, payload: UpdateGroupDto) -> ServiceResult<()>;

    async fn delete(&self, id: String) -> ServiceResult<()>;

    /// PNG QR code encoding the group id
    async fn generate_qr_code(&self, id: String) -> ServiceResult<Vec<u8>>;
}

pub struct GroupServiceImpl {
    group_repository: Arc<dyn GroupRepository>,
    village_repository: Arc<dyn VillageRepository>,
    id_generator: Arc<dyn IdGenerator>,
    qr_code_generator: Arc<dyn QrCodeGenerator>,
}

impl GroupServiceImpl {
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        village_repository: Arc<dyn VillageRepository>,
        id_generator: Arc<dyn IdGenerator>,
        qr_code_generator: Arc<dyn QrCodeGenerator>,
    ) -> Self {
        Self {
            group_repository,
            village_repository,
            id_generator,
            qr_code_generator,
        }
    }
}

#[async_trait]
impl GroupService for GroupServiceImpl {
    async fn create(&self, payload: CreateGroupDto) -> ServiceResult<String> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let village = self
            .village_repository
            .find_by_id(&payload.village_id)
            .await
            .map_err(map_error)?;

        let id = self.id_generator.generate_group_id().map_err(map_error)?;

        let group = Group {
            address: Address::new(id.clone(), payload.address, village),
            id,
            name: payload.name,
            leader: payload.leader,
            properties: Vec::new(),
        };
        self.group_repository
            .insert(&group)
            .await
            .map_err(map_error)?;

        tracing::info!("Group {} created", group.id);
        Ok(group.id)
    }

    async fn get_all(&self) -> ServiceResult<Vec<GroupDto>> {
        let groups = self.group_repository.find_all().await.map_err(map_error)?;
        Ok(groups.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: String) -> ServiceResult<GroupDto> {
        let group = self
            .group_repository
            .find_by_id(&id)
            .await
            .map_err(map_error)?;
        Ok(group.into())
    }

    async fn update(&self, id: String, payload: UpdateGroupDto) -> ServiceResult<()> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let update = GroupUpdate {
            name: payload.name,
            leader: payload.leader,
        };
        self.group_repository
            .update(&id, &update)
            .await
            .map_err(map_error)
    }

    async fn delete(&self, id: String) -> ServiceResult<()> {
        self.group_repository.delete(&id).await.map_err(map_error)?;
        tracing::info!("Group {} deleted", id);
        Ok(())
    }

    async fn generate_qr_code(&self, id: String) -> ServiceResult<Vec<u8>> {
        let group = self
            .group_repository
            .find_by_id(&id)
            .await
            .map_err(map_error)?;

        let qr = Arc::clone(&self.qr_code_generator);
        tokio::task::spawn_blocking(move || qr.generate(&group.id, EcLevel::M, QR_CODE_SIZE))
            .await
            .map_err(map_error)?
            .map_err(map_error)
    }
}
