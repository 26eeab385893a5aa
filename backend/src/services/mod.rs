pub mod auth;
pub mod credentials;
pub mod profile;
pub mod search;
pub mod seed;
pub mod spam;
pub mod tokens;
