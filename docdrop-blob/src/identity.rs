use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Length of the random segment of every generated identity
pub const IDENTITY_LEN: usize = 5;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Name under which a stored file lives, e.g. `k3x9q.pdf`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap an already-sanitised name
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strategy for naming newly uploaded files
pub trait IdentityStrategy: Send + Sync {
    /// Produce a fresh identity with the given (already validated) extension
    fn generate(&self, extension: &str) -> Identity;
}

/// Default strategy: five random characters from `[a-z0-9]` plus the extension.
///
/// No lookup against existing storage is made; a repeated name overwrites.
pub struct RandomIdentity<R = StdRng> {
    rng: Mutex<R>,
}

impl RandomIdentity<StdRng> {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic sequence for tests and reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomIdentity<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> RandomIdentity<R> {
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> IdentityStrategy for RandomIdentity<R> {
    fn generate(&self, extension: &str) -> Identity {
        let mut rng = self.rng.lock();
        let base: String = (0..IDENTITY_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();

        Identity(format!("{}.{}", base, extension.to_ascii_lowercase()))
    }
}
