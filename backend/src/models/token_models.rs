use chrono::NaiveDateTime;
use diesel::prelude::*;
use crate::schema::revoked_tokens;

/// A blacklisted JWT, keyed by its `jti` claim.
#[derive(Insertable)]
#[diesel(table_name = revoked_tokens)]
pub struct NewRevokedToken {
    pub jti: String,
    pub user_id: i32,
    pub token_type: String,
    pub expires_at: NaiveDateTime,
    pub revoked_at: NaiveDateTime,
}
