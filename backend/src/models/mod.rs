pub mod contact_models;
pub mod spam_models;
pub mod token_models;
pub mod user_models;
