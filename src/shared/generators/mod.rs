//! Stateless generators used by the services: identifiers, password hashes,
//! QR images and access tokens. Each sits behind a trait so services can be
//! tested against mocks.

mod id_generator;
mod password_generator;
mod qrcode_generator;
mod token_generator;

use thiserror::Error;

pub use id_generator::{IdGenerator, RandomIdGenerator};
pub use password_generator::{Argon2PasswordGenerator, PasswordGenerator};
pub use qrcode_generator::{PngQrCodeGenerator, QrCodeGenerator};
pub use token_generator::{JwtTokenGenerator, TokenClaims, TokenGenerator};

#[cfg(test)]
pub use id_generator::MockIdGenerator;
#[cfg(test)]
pub use password_generator::MockPasswordGenerator;
#[cfg(test)]
pub use qrcode_generator::MockQrCodeGenerator;
#[cfg(test)]
pub use token_generator::MockTokenGenerator;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("random source failed: {0}")]
    Random(#[from] rand::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("qr code encoding failed: {0}")]
    QrCode(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
