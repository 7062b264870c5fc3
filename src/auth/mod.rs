// src/auth/mod.rs
mod service_account;

pub use service_account::{
    fetch_access_token, AccessToken, ServiceAccountKey, TokenError, CLOUD_PLATFORM_SCOPE,
};
