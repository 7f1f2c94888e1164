use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::properties::models::Property;

/// Request body for creating or updating a property
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct PropertyPayloadDto {
    #[validate(length(min = 2, max = 80))]
    #[schema(example = "Dadak Merak")]
    pub name: String,

    #[validate(length(min = 2, max = 1000))]
    #[schema(example = "Topeng kepala singa berhias bulu merak")]
    pub description: String,

    #[validate(range(min = 1))]
    #[schema(example = 2, minimum = 1)]
    pub amount: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PropertyDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: u16,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            // The amount column is CHECKed to 1..=65535
            amount: u16::try_from(p.amount).unwrap_or(u16::MAX),
        }
    }
}
