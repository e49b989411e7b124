//! Login client: the form controller plus its network and storage
//! collaborators.

mod api;
mod error;
mod form;
mod session;
mod storage;

pub use self::api::{HttpLoginClient, LoginApi};
pub use self::error::{ClientError, TokenStorageError};
pub use self::form::{LoginForm, ALERT_MESSAGE};
pub use self::session::{current_token, current_token_at, logged_in, logout};
pub use self::storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
