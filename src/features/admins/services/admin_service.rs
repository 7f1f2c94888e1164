use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::core::error::{map_error, ServiceError, ServiceResult};
use crate::features::admins::dtos::{CredentialDto, TokenDto};
use crate::features::admins::models::Admin;
use crate::features::admins::repositories::AdminRepository;
use crate::shared::generators::{IdGenerator, PasswordGenerator, TokenGenerator};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Exchange a username and password for an access token
    async fn login(&self, credential: CredentialDto) -> ServiceResult<TokenDto>;

    /// Create the administrator account, returning its id.
    ///
    /// Fails with `DataAlreadyExists` when the username is taken.
    async fn seed(&self, name: String, credential: CredentialDto) -> ServiceResult<String>;
}

pub struct AdminServiceImpl {
    admin_repository: Arc<dyn AdminRepository>,
    id_generator: Arc<dyn IdGenerator>,
    password_generator: Arc<dyn PasswordGenerator>,
    token_generator: Arc<dyn TokenGenerator>,
}

impl AdminServiceImpl {
    pub fn new(
        admin_repository: Arc<dyn AdminRepository>,
        id_generator: Arc<dyn IdGenerator>,
        password_generator: Arc<dyn PasswordGenerator>,
        token_generator: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            admin_repository,
            id_generator,
            password_generator,
            token_generator,
        }
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn login(&self, credential: CredentialDto) -> ServiceResult<TokenDto> {
        credential
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let admin = self
            .admin_repository
            .find_by_username(&credential.username)
            .await
            .map_err(map_error)?;

        // Argon2 verification is CPU bound
        let passwords = Arc::clone(&self.password_generator);
        let hash = admin.password.clone();
        let matches =
            tokio::task::spawn_blocking(move || passwords.verify(&credential.password, &hash))
                .await
                .map_err(map_error)?
                .map_err(map_error)?;

        if !matches {
            tracing::info!("Rejected login for admin {}", admin.username);
            return Err(ServiceError::CredentialNotMatch);
        }

        let token = self
            .token_generator
            .generate_token(&admin.id, &admin.username)
            .map_err(map_error)?;

        tracing::info!("Admin {} logged in", admin.username);
        Ok(TokenDto { token })
    }

    async fn seed(&self, name: String, credential: CredentialDto) -> ServiceResult<String> {
        credential
            .validate()
            .map_err(|_| ServiceError::InvalidPayload)?;

        let id = self.id_generator.generate_admin_id().map_err(map_error)?;

        let passwords = Arc::clone(&self.password_generator);
        let plain = credential.password;
        let password = tokio::task::spawn_blocking(move || passwords.hash(&plain))
            .await
            .map_err(map_error)?
            .map_err(map_error)?;

        let admin = Admin {
            id,
            username: credential.username,
            name,
            password,
        };
        self.admin_repository
            .insert(&admin)
            .await
            .map_err(map_error)?;

        Ok(admin.id)
    }
}
