//! Number details with contact-gated email disclosure.

use diesel::sqlite::SqliteConnection;

use crate::error::{AppError, AppResult};
use crate::models::user_models::User;
use crate::repositories::{ContactRepository, SpamRepository, UserRepository};

/// Details for a phone number as seen by one requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberDetail {
    pub phone_number: String,
    pub spam_count: i64,
    pub owner: Option<OwnerDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDetail {
    pub name: String,
    /// `None` when hidden from the requester or not on file.
    pub email: Option<String>,
}

/// The owner's email is only disclosed when `requester` has the number saved
/// as one of their contacts.
pub fn display_detail(conn: &mut SqliteConnection, requester: &User, phone_number: &str) -> AppResult<NumberDetail> {
    if phone_number.is_empty() {
        return Err(AppError::BadRequest("Phone number is required.".to_string()));
    }

    let spam_count = SpamRepository::count_for(conn, phone_number)?;

    let owner = match UserRepository::find_by_phone_number(conn, phone_number)? {
        Some(user) => {
            let saved = ContactRepository::is_saved_by(conn, requester.id, phone_number)?;
            Some(OwnerDetail {
                name: user.name,
                email: if saved { user.email } else { None },
            })
        }
        None => None,
    };

    Ok(NumberDetail {
        phone_number: phone_number.to_string(),
        spam_count,
        owner,
    })
}
