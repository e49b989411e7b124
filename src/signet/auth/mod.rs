//! Authentication: tokens, credential checks, and request identity.
//!
//! ## Tokens
//!
//! HMAC-SHA256 JWTs carrying the user id and an expiry. The secret is loaded
//! once at startup and never changes for the life of the process.
//!
//! > **Warning:** Rotating the secret invalidates every outstanding token.
//!
//! ## Credentials
//!
//! Passwords are stored as Argon2id PHC strings. Emails are matched exactly
//! after trimming surrounding whitespace.

mod context;
mod error;
mod login;
mod password;
mod state;
mod token;
mod verifier;

pub use context::{auth_context, AuthContext};
pub use error::{AuthError, ErrorResponse};
pub use login::{login, register, valid_email, AuthPayload};
pub use password::{hash_password, verify_password, MIN_PASSWORD_LEN};
pub use state::{AuthConfig, AuthState};
pub use token::{peek_claims, TokenClaims, TokenService, DEFAULT_TOKEN_TTL_SECONDS};
pub use verifier::{normalize_email, CredentialVerifier};
