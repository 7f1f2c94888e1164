use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::show_schedules::models::ShowSchedule;
use crate::shared::time_format::format_rfc822;

/// Request body for scheduling a show
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateShowScheduleDto {
    #[serde(rename = "groupID")]
    #[validate(length(min = 2, max = 10))]
    #[schema(example = "g-abc")]
    pub group_id: String,

    #[validate(length(min = 2, max = 1000))]
    #[schema(example = "Alun-alun Ponorogo")]
    pub place: String,

    #[serde(rename = "startOn")]
    #[validate(length(min = 2, max = 30))]
    #[schema(example = "17 Aug 24 19:00 WIB")]
    pub start_on: String,

    #[serde(rename = "finishOn")]
    #[validate(length(min = 2, max = 30))]
    #[schema(example = "17 Aug 24 22:00 WIB")]
    pub finish_on: String,
}

/// Request body for rescheduling a show
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateShowScheduleDto {
    #[validate(length(min = 2, max = 1000))]
    pub place: String,

    #[serde(rename = "startOn")]
    #[validate(length(min = 2, max = 30))]
    pub start_on: String,

    #[serde(rename = "finishOn")]
    #[validate(length(min = 2, max = 30))]
    pub finish_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShowScheduleDto {
    pub id: String,
    #[serde(rename = "groupID")]
    pub group_id: String,
    pub place: String,
    #[serde(rename = "startOn")]
    pub start_on: String,
    #[serde(rename = "finishOn")]
    pub finish_on: String,
}

impl From<ShowSchedule> for ShowScheduleDto {
    fn from(s: ShowSchedule) -> Self {
        Self {
            start_on: format_rfc822(&s.start_on),
            finish_on: format_rfc822(&s.finish_on),
            id: s.id,
            group_id: s.group_id,
            place: s.place,
        }
    }
}

/// A show with the name of the group performing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShowScheduleDetailsDto {
    pub id: String,
    #[serde(rename = "groupID")]
    pub group_id: String,
    #[serde(rename = "groupName")]
    pub group_name: String,
    pub place: String,
    #[serde(rename = "startOn")]
    pub start_on: String,
    #[serde(rename = "finishOn")]
    pub finish_on: String,
}

impl ShowScheduleDetailsDto {
    pub fn new(show: ShowSchedule, group_name: String) -> Self {
        let ShowScheduleDto {
            id,
            group_id,
            place,
            start_on,
            finish_on,
        } = show.into();
        Self {
            id,
            group_id,
            group_name,
            place,
            start_on,
            finish_on,
        }
    }
}

/// `?group_id=` filter of the list endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ShowScheduleQuery {
    /// Only shows of this group
    pub group_id: String,
}

/// `data` of the list endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShowsResponseDto {
    pub shows: Vec<ShowScheduleDto>,
}

/// `data` of the detail endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShowResponseDto {
    pub show: ShowScheduleDetailsDto,
}
