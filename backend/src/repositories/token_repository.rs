use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::result::Error as DieselError;
use crate::{
    models::token_models::NewRevokedToken,
    schema::revoked_tokens,
};

pub struct RevokedTokenRepository;

impl RevokedTokenRepository {
    /// Records `token` as revoked. Revoking the same `jti` twice is a no-op.
    pub fn revoke(conn: &mut SqliteConnection, token: &NewRevokedToken) -> Result<(), DieselError> {
        diesel::insert_or_ignore_into(revoked_tokens::table)
            .values(token)
            .execute(conn)?;
        Ok(())
    }

    pub fn is_revoked(conn: &mut SqliteConnection, jti: &str) -> Result<bool, DieselError> {
        diesel::select(diesel::dsl::exists(
            revoked_tokens::table.filter(revoked_tokens::jti.eq(jti)),
        ))
        .get_result(conn)
    }

    /// Drops entries for tokens that have expired on their own and can no
    /// longer pass signature validation anyway.
    pub fn purge_expired(conn: &mut SqliteConnection, now: NaiveDateTime) -> Result<usize, DieselError> {
        diesel::delete(revoked_tokens::table.filter(revoked_tokens::expires_at.lt(now)))
            .execute(conn)
    }
}
