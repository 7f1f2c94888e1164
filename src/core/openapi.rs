use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::addresses::{dtos as addresses_dtos, handlers as addresses_handlers};
use crate::features::admins::{dtos as admins_dtos, handlers as admins_handlers};
use crate::features::groups::{dtos as groups_dtos, handlers as groups_handlers};
use crate::features::properties::{dtos as properties_dtos, handlers as properties_handlers};
use crate::features::show_schedules::{
    dtos as show_schedules_dtos, handlers as show_schedules_handlers,
};
use crate::shared::types::{ApiResponse, ErrorResponse, IdDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Admins
        admins_handlers::login,
        // Groups
        groups_handlers::create_group,
        groups_handlers::get_groups,
        groups_handlers::get_group,
        groups_handlers::update_group,
        groups_handlers::delete_group,
        groups_handlers::generate_group_qr_code,
        // Addresses
        addresses_handlers::update_address,
        // Properties
        properties_handlers::create_property,
        properties_handlers::update_property,
        properties_handlers::delete_property,
        properties_handlers::generate_property_qr_code,
        // Show schedules
        show_schedules_handlers::create_show,
        show_schedules_handlers::get_shows,
        show_schedules_handlers::get_show,
        show_schedules_handlers::update_show,
        show_schedules_handlers::delete_show,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            IdDto,
            ApiResponse<IdDto>,
            // Admins
            admins_dtos::CredentialDto,
            admins_dtos::TokenDto,
            ApiResponse<admins_dtos::TokenDto>,
            // Groups
            groups_dtos::CreateGroupDto,
            groups_dtos::UpdateGroupDto,
            groups_dtos::GroupDto,
            groups_dtos::GroupsResponseDto,
            groups_dtos::GroupResponseDto,
            ApiResponse<groups_dtos::GroupsResponseDto>,
            ApiResponse<groups_dtos::GroupResponseDto>,
            // Addresses
            addresses_dtos::UpdateAddressDto,
            addresses_dtos::AddressDto,
            // Properties
            properties_dtos::PropertyPayloadDto,
            properties_dtos::PropertyDto,
            // Show schedules
            show_schedules_dtos::CreateShowScheduleDto,
            show_schedules_dtos::UpdateShowScheduleDto,
            show_schedules_dtos::ShowScheduleDto,
            show_schedules_dtos::ShowScheduleDetailsDto,
            show_schedules_dtos::ShowsResponseDto,
            show_schedules_dtos::ShowResponseDto,
            ApiResponse<show_schedules_dtos::ShowsResponseDto>,
            ApiResponse<show_schedules_dtos::ShowResponseDto>,
        )
    ),
    tags(
        (name = "admins", description = "Administrator login"),
        (name = "groups", description = "Reog troupes"),
        (name = "addresses", description = "Group addresses"),
        (name = "properties", description = "Group inventory"),
        (name = "shows", description = "Show schedules"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Reog Registry API",
        version = "0.1.0",
        description = "API documentation for the Reog troupe registry",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/admins",
            "/api/v1/groups",
            "/api/v1/groups/{id}",
            "/api/v1/groups/{id}/generate",
            "/api/v1/groups/addresses/{id}",
            "/api/v1/groups/{id}/properties",
            "/api/v1/groups/{id}/properties/{propertyID}",
            "/api/v1/groups/{id}/properties/{propertyID}/generate",
            "/api/v1/shows",
            "/api/v1/shows/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Registry".to_string(),
            version: "1.2.3".to_string(),
            description: "staging".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Registry");
        assert_eq!(doc.info.version, "1.2.3");
        assert_eq!(doc.info.description.as_deref(), Some("staging"));
    }
}
