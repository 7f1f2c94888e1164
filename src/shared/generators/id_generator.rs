use rand::{rngs::OsRng, RngCore};

use super::GeneratorError;
use crate::shared::constants::{
    ADMIN_ID_PREFIX, ADMIN_ID_SIZE, GROUP_ID_PREFIX, GROUP_ID_SIZE, PROPERTY_ID_PREFIX,
    PROPERTY_ID_SIZE, SHOW_SCHEDULE_ID_PREFIX, SHOW_SCHEDULE_ID_SIZE,
};

/// URL-safe alphabet; 64 symbols so a random byte masked with 63 is unbiased
const ALPHABET: &[u8; 64] = b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn generate_admin_id(&self) -> Result<String, GeneratorError>;
    fn generate_group_id(&self) -> Result<String, GeneratorError>;
    fn generate_property_id(&self) -> Result<String, GeneratorError>;
    fn generate_show_schedule_id(&self) -> Result<String, GeneratorError>;
}

/// Prefixed random codes drawn from the operating system RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }

    fn generate(prefix: &str, size: usize) -> Result<String, GeneratorError> {
        let mut bytes = vec![0u8; size];
        OsRng.try_fill_bytes(&mut bytes)?;

        let mut id = String::with_capacity(prefix.len() + size);
        id.push_str(prefix);
        id.extend(bytes.iter().map(|b| ALPHABET[(b & 63) as usize] as char));
        Ok(id)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate_admin_id(&self) -> Result<String, GeneratorError> {
        Self::generate(ADMIN_ID_PREFIX, ADMIN_ID_SIZE)
    }

    fn generate_group_id(&self) -> Result<String, GeneratorError> {
        Self::generate(GROUP_ID_PREFIX, GROUP_ID_SIZE)
    }

    fn generate_property_id(&self) -> Result<String, GeneratorError> {
        Self::generate(PROPERTY_ID_PREFIX, PROPERTY_ID_SIZE)
    }

    fn generate_show_schedule_id(&self) -> Result<String, GeneratorError> {
        Self::generate(SHOW_SCHEDULE_ID_PREFIX, SHOW_SCHEDULE_ID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_shape(id: &str, prefix: &str, size: usize) {
        let code = id.strip_prefix(prefix).expect("missing prefix");
        assert_eq!(code.len(), size, "unexpected length for {id}");
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "bad symbol in {id}");
    }

    #[test]
    fn test_ids_have_prefix_and_size() {
        let generator = RandomIdGenerator::new();
        assert_shape(&generator.generate_admin_id().unwrap(), "a-", 3);
        assert_shape(&generator.generate_group_id().unwrap(), "g-", 3);
        assert_shape(&generator.generate_property_id().unwrap(), "p-", 7);
        assert_shape(&generator.generate_show_schedule_id().unwrap(), "s-", 7);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let symbols: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(symbols.len(), 64);
    }

    #[test]
    fn test_long_ids_rarely_collide() {
        let generator = RandomIdGenerator::new();
        let ids: HashSet<String> = (0..1000)
            .map(|_| generator.generate_property_id().unwrap())
            .collect();
        assert_eq!(ids.len(), 1000);
    }
}
