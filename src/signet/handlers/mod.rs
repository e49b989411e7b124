pub mod health;
pub use self::health::health;

pub mod me;
pub use self::me::me;

pub mod user_login;
pub use self::user_login::login;

pub mod user_register;
pub use self::user_register::register;

// axum handler for /
pub async fn root() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
