use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::core::error::{map_error, ServiceError, ServiceResult};
use crate::features::addresses::dtos::UpdateAddressDto;
use crate::features::addresses::models::Address;
use crate::features::addresses::repositories::AddressRepository;
use crate::features::villages::VillageRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressService: Send + Sync {
    async fn update(&self, id: String, payload: UpdateAddressDto) -> ServiceResult<()>;
}

pub struct AddressServiceImpl {
    address_repository: Arc<dyn AddressRepository>,
    village_repository: Arc<dyn VillageRepository>,
}

impl AddressServiceImpl {
    pub fn new(
        address_repository: Arc<dyn AddressRepository>,
        village_repository: Arc<dyn VillageRepository>,
    ) -> Self {
        Self {
            address_repository,
            village_repository,
        }
    }
}

#[async_trait]
impl AddressService for AddressServiceImpl {
    async fn update(&self, id: String, payload: UpdateAddressDto) -> ServiceResult<()> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let village = self
            .village_repository
            .find_by_id(&payload.village_id)
            .await
            .map_err(map_error)?;

        let address = Address::new(id, payload.address, village);
        self.address_repository
            .update(&address)
            .await
            .map_err(map_error)
    }
}
