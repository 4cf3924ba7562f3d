use crate::core::error::{ConfigError, Error};

/// Converts a plaintext secret into a salted, one-way digest and checks a
/// secret against a previously stored digest.
pub(crate) trait Hasher: Clone + Send + Sync + 'static {
    fn hash(&self, secret: &str) -> Result<String, Error>;

    /// `Ok(false)` on mismatch; errors only when `stored_hash` is malformed.
    fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, Error>;
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub(crate) const MIN_COST: u32 = 4;
    pub(crate) const MAX_COST: u32 = 15;

    pub(crate) fn new(cost: u32) -> Result<Self, ConfigError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(ConfigError::HashCost(cost));
        }

        Ok(Self { cost })
    }
}

impl Hasher for BcryptHasher {
    fn hash(&self, secret: &str) -> Result<String, Error> {
        bcrypt::hash(secret, self.cost).map_err(Error::Bcrypt)
    }

    fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, Error> {
        bcrypt::verify(secret, stored_hash).map_err(Error::Bcrypt)
    }
}
