use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::core::error::{map_error, ServiceError, ServiceResult};
use crate::features::groups::GroupRepository;
use crate::features::show_schedules::dtos::{
    CreateShowScheduleDto, ShowScheduleDetailsDto, ShowScheduleDto, UpdateShowScheduleDto,
};
use crate::features::show_schedules::models::{ShowSchedule, ShowScheduleUpdate};
use crate::features::show_schedules::repositories::ShowScheduleRepository;
use crate::shared::generators::IdGenerator;
use crate::shared::time_format::parse_rfc822;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShowScheduleService: Send + Sync {
    /// Schedule a show for an existing group, returning the new schedule id
    async fn create(&self, payload: CreateShowScheduleDto) -> ServiceResult<String>;

    async fn get_all(&self) -> ServiceResult<Vec<ShowScheduleDto>>;

    /// Shows of one group; the group itself must exist
    async fn get_by_group_id(&self, group_id: String) -> ServiceResult<Vec<ShowScheduleDto>>;

    async fn get_by_id(&self, id: String) -> ServiceResult<ShowScheduleDetailsDto>;

    async fn update(&self, id: String, payload: UpdateShowScheduleDto) -> ServiceResult<()>;

    async fn delete(&self, id: String) -> ServiceResult<()>;
}

pub struct ShowScheduleServiceImpl {
    show_schedule_repository: Arc<dyn ShowScheduleRepository>,
    group_repository: Arc<dyn GroupRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl ShowScheduleServiceImpl {
    pub fn new(
        show_schedule_repository: Arc<dyn ShowScheduleRepository>,
        group_repository: Arc<dyn GroupRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            show_schedule_repository,
            group_repository,
            id_generator,
        }
    }
}

/// Parse the start and finish of a show
fn parse_period(start_on: &str, finish_on: &str) -> ServiceResult<(DateTime<Utc>, DateTime<Utc>)> {
    let parse = |input: &str| {
        parse_rfc822(input).map_err(|e| {
            tracing::debug!("{}", e);
            ServiceError::TimeParsing
        })
    };
    Ok((parse(start_on)?, parse(finish_on)?))
}

#[async_trait]
impl ShowScheduleService for ShowScheduleServiceImpl {
    async fn create(&self, payload: CreateShowScheduleDto) -> ServiceResult<String> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let (start_on, finish_on) = parse_period(&payload.start_on, &payload.finish_on)?;

        self.group_repository
            .find_by_id(&payload.group_id)
            .await
            .map_err(map_error)?;

        let id = self
            .id_generator
            .generate_show_schedule_id()
            .map_err(map_error)?;

        let show = ShowSchedule {
            id,
            group_id: payload.group_id,
            place: payload.place,
            start_on,
            finish_on,
        };
        self.show_schedule_repository
            .insert(&show)
            .await
            .map_err(map_error)?;

        Ok(show.id)
    }

    async fn get_all(&self) -> ServiceResult<Vec<ShowScheduleDto>> {
        let shows = self
            .show_schedule_repository
            .find_all()
            .await
            .map_err(map_error)?;

        Ok(shows.into_iter().map(Into::into).collect())
    }

    async fn get_by_group_id(&self, group_id: String) -> ServiceResult<Vec<ShowScheduleDto>> {
        self.group_repository
            .find_by_id(&group_id)
            .await
            .map_err(map_error)?;

        let shows = self
            .show_schedule_repository
            .find_by_group_id(&group_id)
            .await
            .map_err(map_error)?;

        Ok(shows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: String) -> ServiceResult<ShowScheduleDetailsDto> {
        let show = self
            .show_schedule_repository
            .find_by_id(&id)
            .await
            .map_err(map_error)?;

        let group = self
            .group_repository
            .find_by_id(&show.group_id)
            .await
            .map_err(map_error)?;

        Ok(ShowScheduleDetailsDto::new(show, group.name))
    }

    async fn update(&self, id: String, payload: UpdateShowScheduleDto) -> ServiceResult<()> {
        payload
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let (start_on, finish_on) = parse_period(&payload.start_on, &payload.finish_on)?;

        let update = ShowScheduleUpdate {
            place: payload.place,
            start_on,
            finish_on,
        };
        self.show_schedule_repository
            .update(&id, &update)
            .await
            .map_err(map_error)
    }

    async fn delete(&self, id: String) -> ServiceResult<()> {
        self.show_schedule_repository
            .delete(&id)
            .await
            .map_err(map_error)
    }
}
