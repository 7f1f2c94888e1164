use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::addresses::models::Address;

/// Request body for moving a group to another address
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateAddressDto {
    #[validate(length(min = 2, max = 1000))]
    #[schema(example = "Jl. Batoro Katong No. 1")]
    pub address: String,

    #[serde(rename = "villageID")]
    #[validate(length(min = 2, max = 20))]
    #[schema(example = "3502010001")]
    pub village_id: String,
}

/// Flattened address as returned inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressDto {
    pub id: String,
    pub address: String,
    #[serde(rename = "villageID")]
    pub village_id: String,
    #[serde(rename = "villageName")]
    pub village_name: String,
    #[serde(rename = "districtID")]
    pub district_id: String,
    #[serde(rename = "districtName")]
    pub district_name: String,
    #[serde(rename = "regencyID")]
    pub regency_id: String,
    #[serde(rename = "regencyName")]
    pub regency_name: String,
    #[serde(rename = "provinceID")]
    pub province_id: String,
    #[serde(rename = "provinceName")]
    pub province_name: String,
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            address: a.address,
            village_id: a.village_id,
            village_name: a.village_name,
            district_id: a.district_id,
            district_name: a.district_name,
            regency_id: a.regency_id,
            regency_name: a.regency_name,
            province_id: a.province_id,
            province_name: a.province_name,
        }
    }
}
