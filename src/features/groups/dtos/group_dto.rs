use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::addresses::dtos::AddressDto;
use crate::features::groups::models::Group;
use crate::features::properties::dtos::PropertyDto;

/// Request body for registering a group
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateGroupDto {
    #[validate(length(min = 2, max = 80))]
    #[schema(example = "Paguyuban Reog Singo Barong")]
    pub name: String,

    #[validate(length(min = 2, max = 80))]
    #[schema(example = "Mbah Warok")]
    pub leader: String,

    #[validate(length(min = 2, max = 1000))]
    #[schema(example = "Jl. Batoro Katong No. 1")]
    pub address: String,

    #[serde(rename = "villageID")]
    #[validate(length(min = 2, max = 20))]
    #[schema(example = "3502010001")]
    pub village_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateGroupDto {
    #[validate(length(min = 2, max = 80))]
    pub name: String,

    #[validate(length(min = 2, max = 80))]
    pub leader: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: String,
    pub name: String,
    pub leader: String,
    pub address: AddressDto,
    pub properties: Vec<PropertyDto>,
}

impl From<Group> for GroupDto {
    fn from(g: Group) -> Self {
        Self {
            id: g.id,
            name: g.name,
            leader: g.leader,
            address: g.address.into(),
            properties: g.properties.into_iter().map(Into::into).collect(),
        }
    }
}

/// `data` of the list endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupsResponseDto {
    pub groups: Vec<GroupDto>,
}

/// `data` of the detail endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupResponseDto {
    pub group: GroupDto,
}
