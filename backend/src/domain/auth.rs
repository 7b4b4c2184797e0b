//! Authentication primitives: login credentials and stored password hashes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Credentials are never stored in plaintext; the storage contract only ever
//! sees the encoded hash.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

const SALT_LEN: usize = 16;

/// Parse errors raised when decoding a stored hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashParseError;

impl fmt::Display for PasswordHashParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stored password hash must be salt$digest hex")
    }
}

impl std::error::Error for PasswordHashParseError {}

/// Salted SHA-256 credential hash, encoded as `hex(salt)$hex(digest)`.
///
/// The encoded form is what the store persists and returns; [`verify`]
/// recomputes the digest with the stored salt so the secret itself never
/// round-trips.
///
/// [`verify`]: PasswordHash::verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a password with a fresh random salt.
    pub fn hash(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self(Self::encode(&salt, password))
    }

    /// Decode a previously stored hash string.
    pub fn from_stored(encoded: impl Into<String>) -> Result<Self, PasswordHashParseError> {
        let encoded = encoded.into();
        let Some((salt, digest)) = encoded.split_once('$') else {
            return Err(PasswordHashParseError);
        };
        let salt = hex::decode(salt).map_err(|_| PasswordHashParseError)?;
        if salt.len() != SALT_LEN || hex::decode(digest).is_err() {
            return Err(PasswordHashParseError);
        }
        Ok(Self(encoded))
    }

    /// Check a candidate password against the stored salt and digest.
    ///
    /// The digest comparison is constant-time so the outcome leaks nothing
    /// about how much of the digest matched.
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt, stored)) = self.0.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(stored)) = (hex::decode(salt), hex::decode(stored)) else {
            return false;
        };
        let candidate = Self::digest(&salt, password);
        stored.ct_eq(&candidate).into()
    }

    /// Encoded `salt$digest` form persisted by the store.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn digest(salt: &[u8], password: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hasher.finalize().into()
    }

    fn encode(salt: &[u8], password: &str) -> String {
        format!(
            "{}${}",
            hex::encode(salt),
            hex::encode(Self::digest(salt, password))
        )
    }
}
