//! Name and number lookups across registered users and saved contacts.

use diesel::sqlite::SqliteConnection;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::repositories::{ContactRepository, SpamRepository, UserRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpamLikelihood {
    Spam,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSearchResult {
    pub name: String,
    pub phone_number: String,
    pub spam_likelihood: SpamLikelihood,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberEntry {
    pub name: String,
    pub phone_number: String,
}

/// Outcome of an exact phone-number lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberLookup {
    RegisteredUser(NumberEntry),
    Contacts(Vec<NumberEntry>),
    NotFound,
}

/// Keep the entries whose name contains `query` (case-insensitively) and
/// order them: prefix matches first, then the rest, each group alphabetical.
pub fn rank_by_name(query: &str, entries: Vec<NumberEntry>) -> Vec<NumberEntry> {
    let needle = query.to_lowercase();
    let mut ranked: Vec<(bool, String, NumberEntry)> = entries
        .into_iter()
        .filter_map(|entry| {
            let folded = entry.name.to_lowercase();
            folded
                .contains(&needle)
                .then(|| (!folded.starts_with(&needle), folded, entry))
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.name.cmp(&b.2.name))
    });

    ranked.into_iter().map(|(_, _, entry)| entry).collect()
}

/// Users matching `query` followed by contacts matching it, each ranked by
/// [`rank_by_name`] and tagged with whether the number was ever reported.
pub fn search_by_name(conn: &mut SqliteConnection, query: &str) -> AppResult<Vec<NameSearchResult>> {
    if query.is_empty() {
        return Err(AppError::BadRequest("Name query parameter is required.".to_string()));
    }

    let users = UserRepository::search_by_name(conn, query)?
        .into_iter()
        .map(|user| NumberEntry { name: user.name, phone_number: user.phone_number })
        .collect();
    let contacts = ContactRepository::search_by_name(conn, query)?
        .into_iter()
        .map(|contact| NumberEntry { name: contact.name, phone_number: contact.phone_number })
        .collect();

    let mut matches = rank_by_name(query, users);
    matches.extend(rank_by_name(query, contacts));

    let numbers: Vec<&str> = matches.iter().map(|m| m.phone_number.as_str()).collect();
    let reported = SpamRepository::reported_numbers(conn, &numbers)?;

    Ok(matches
        .into_iter()
        .map(|entry| {
            let spam_likelihood = if reported.contains(&entry.phone_number) {
                SpamLikelihood::Spam
            } else {
                SpamLikelihood::Unknown
            };
            NameSearchResult {
                name: entry.name,
                phone_number: entry.phone_number,
                spam_likelihood,
            }
        })
        .collect())
}

/// A registered user wins over contacts; contacts from every owner are
/// returned when no user holds the number.
pub fn search_by_number(conn: &mut SqliteConnection, phone_number: &str) -> AppResult<NumberLookup> {
    if phone_number.is_empty() {
        return Err(AppError::BadRequest("Phone number is required.".to_string()));
    }

    if let Some(user) = UserRepository::find_by_phone_number(conn, phone_number)? {
        return Ok(NumberLookup::RegisteredUser(NumberEntry {
            name: user.name,
            phone_number: user.phone_number,
        }));
    }

    let contacts = ContactRepository::find_by_phone_number(conn, phone_number)?;
    if contacts.is_empty() {
        return Ok(NumberLookup::NotFound);
    }

    Ok(NumberLookup::Contacts(
        contacts
            .into_iter()
            .map(|contact| NumberEntry { name: contact.name, phone_number: contact.phone_number })
            .collect(),
    ))
}
