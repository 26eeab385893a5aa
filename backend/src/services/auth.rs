//! Registration, login and the token lifecycle.

use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

use crate::error::{AppError, AppResult, FieldErrors};
use crate::models::token_models::NewRevokedToken;
use crate::models::user_models::{NewUser, User};
use crate::repositories::{RevokedTokenRepository, UserRepository};
use crate::services::credentials::{validate_registration, RegistrationInput};
use crate::services::tokens::{Claims, TokenError, TokenPair, TokenService, TokenType};

const DUPLICATE_PHONE_NUMBER: &str = "A user with this phone number already exists.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account flags set at creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountKind {
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AccountKind {
    pub const REGULAR: Self = Self { is_staff: false, is_superuser: false };
    pub const SUPERUSER: Self = Self { is_staff: true, is_superuser: true };
}

/// Validate `input` and create the account. Nothing is written unless every
/// rule passes.
pub fn register(
    conn: &mut SqliteConnection,
    input: RegistrationInput,
    kind: AccountKind,
    bcrypt_cost: u32,
) -> AppResult<User> {
    let valid = validate_registration(input).map_err(AppError::Validation)?;

    if UserRepository::phone_number_taken(conn, &valid.phone_number)? {
        return Err(duplicate_phone_number());
    }

    let password_hash = bcrypt::hash(&valid.password, bcrypt_cost)?;

    let new_user = NewUser {
        phone_number: valid.phone_number,
        name: valid.name,
        email: valid.email,
        password_hash,
        is_active: true,
        is_staff: kind.is_staff,
        is_superuser: kind.is_superuser,
        date_joined: Utc::now().naive_utc(),
    };

    // A concurrent registration can still win the race past the check above.
    UserRepository::create(conn, &new_user).map_err(|e| match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => duplicate_phone_number(),
        other => AppError::Database(other),
    })
}

fn duplicate_phone_number() -> AppError {
    let mut errors = FieldErrors::new();
    errors.add("phone_number", DUPLICATE_PHONE_NUMBER);
    AppError::Validation(errors)
}

/// Check the credentials and issue a fresh token pair.
pub fn login(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    phone_number: Option<&str>,
    password: Option<&str>,
) -> AppResult<(User, TokenPair)> {
    let (phone_number, password) = match (
        phone_number.filter(|p| !p.is_empty()),
        password.filter(|p| !p.is_empty()),
    ) {
        (Some(phone_number), Some(password)) => (phone_number, password),
        (phone_number, password) => {
            let mut errors = FieldErrors::new();
            if phone_number.is_none() {
                errors.add("phone_number", "This field is required.");
            }
            if password.is_none() {
                errors.add("password", "This field is required.");
            }
            return Err(AppError::Validation(errors));
        }
    };

    let user = UserRepository::find_by_phone_number(conn, phone_number)?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::AuthenticationFailed(INVALID_CREDENTIALS.to_string()))?;

    // A malformed stored hash is treated like a wrong password.
    let valid = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
    if !valid {
        return Err(AppError::AuthenticationFailed(INVALID_CREDENTIALS.to_string()));
    }

    let pair = tokens.issue_pair(user.id)?;
    Ok((user, pair))
}

/// Resolve a bearer access token to an active user.
pub fn authenticate(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    access_token: &str,
) -> AppResult<(User, Claims)> {
    let claims = tokens.decode(access_token, TokenType::Access)?;
    if RevokedTokenRepository::is_revoked(conn, &claims.jti)? {
        return Err(TokenError::Revoked.into());
    }

    let user = UserRepository::find_by_id(conn, claims.sub)?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::Unauthorized("User not found or inactive".to_string()))?;

    Ok((user, claims))
}

/// Blacklist `refresh_token`, and the access token that made the request.
pub fn logout(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    user: &User,
    access_claims: &Claims,
    refresh_token: Option<&str>,
) -> AppResult<()> {
    let refresh_token = refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Refresh token is required to logout.".to_string()))?;

    let refresh_claims = tokens
        .decode(refresh_token, TokenType::Refresh)
        .map_err(|e| match e {
            TokenError::Encode(_) => AppError::Token(e),
            _ => AppError::BadRequest("Token is invalid or expired".to_string()),
        })?;
    if refresh_claims.sub != user.id {
        return Err(AppError::BadRequest(
            "Refresh token does not belong to the authenticated user".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let revocations = [
        NewRevokedToken {
            jti: refresh_claims.jti.clone(),
            user_id: user.id,
            token_type: TokenType::Refresh.as_str().to_string(),
            expires_at: refresh_claims.expires_at(),
            revoked_at: now,
        },
        NewRevokedToken {
            jti: access_claims.jti.clone(),
            user_id: user.id,
            token_type: TokenType::Access.as_str().to_string(),
            expires_at: access_claims.expires_at(),
            revoked_at: now,
        },
    ];

    conn.immediate_transaction(|conn| {
        for revocation in &revocations {
            RevokedTokenRepository::revoke(conn, revocation)?;
        }
        Ok::<_, DieselError>(())
    })?;

    Ok(())
}

/// Mint a new access token from a live refresh token.
pub fn refresh(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    refresh_token: Option<&str>,
) -> AppResult<String> {
    let refresh_token = refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Refresh token is required.".to_string()))?;

    let claims = tokens.decode(refresh_token, TokenType::Refresh)?;
    if RevokedTokenRepository::is_revoked(conn, &claims.jti)? {
        return Err(TokenError::Revoked.into());
    }

    let user = UserRepository::find_by_id(conn, claims.sub)?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::Unauthorized("User not found or inactive".to_string()))?;

    Ok(tokens.issue(user.id, TokenType::Access)?)
}
