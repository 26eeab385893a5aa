//! Fake data for local development: users, their address books and spam
//! reports.

use std::collections::HashSet;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::contact_models::NewContact;
use crate::models::spam_models::NewSpamReport;
use crate::models::user_models::User;
use crate::repositories::{ContactRepository, SpamRepository, UserRepository};
use crate::services::auth::{self, AccountKind};
use crate::services::credentials::RegistrationInput;
use crate::services::tokens::{TokenPair, TokenService};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Aditi", "Akash", "Alice", "Amit", "Ananya", "Arjun", "Deepa", "Divya", "Farhan",
    "Gaurav", "Ishaan", "Kavya", "Kiran", "Meera", "Neha", "Nikhil", "Pooja", "Priya", "Rahul",
    "Rohan", "Sanjay", "Sneha", "Tanvi", "Vikram",
];

const LAST_NAMES: &[&str] = &[
    "Bose", "Chopra", "Das", "Gupta", "Iyer", "Joshi", "Kapoor", "Khan", "Kumar", "Mehta",
    "Menon", "Nair", "Patel", "Rao", "Reddy", "Shah", "Sharma", "Singh", "Verma",
];

const MAX_NUMBER_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub users: usize,
    pub password: String,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct SeededUser {
    pub user: User,
    pub contacts: usize,
    pub spam_reports: usize,
    pub tokens: TokenPair,
}

pub fn populate(conn: &mut SqliteConnection, tokens: &TokenService, options: &SeedOptions) -> AppResult<Vec<SeededUser>> {
    populate_with(conn, tokens, options, &mut rand::rng())
}

/// Creates `options.users` accounts, each with 1-10 contacts and 0-15 spam
/// reports, in a single transaction.
pub fn populate_with<R: Rng>(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    options: &SeedOptions,
    rng: &mut R,
) -> AppResult<Vec<SeededUser>> {
    conn.transaction(|conn| {
        let mut taken = HashSet::new();
        let mut users = Vec::with_capacity(options.users);

        for _ in 0..options.users {
            let phone_number = unused_user_number(conn, &mut taken, rng)?;
            let name = fake_name(rng);
            let email = format!(
                "{}.{}@example.com",
                name.replace(' ', ".").to_lowercase(),
                &phone_number[6..]
            );

            let user = auth::register(
                conn,
                RegistrationInput {
                    name: Some(name),
                    phone_number: Some(phone_number),
                    email: Some(email),
                    password: Some(options.password.clone()),
                },
                AccountKind::REGULAR,
                options.bcrypt_cost,
            )?;
            tracing::info!(phone_number = %user.phone_number, "Seeded user");
            users.push(user);
        }

        let registered: Vec<String> = users.iter().map(|u| u.phone_number.clone()).collect();
        let mut seeded = Vec::with_capacity(users.len());
        for user in users {
            let contacts: Vec<NewContact> = (0..rng.random_range(1..=10))
                .map(|_| NewContact {
                    user_id: user.id,
                    name: fake_name(rng),
                    phone_number: fake_number(rng, &registered),
                })
                .collect();
            ContactRepository::create_many(conn, &contacts)?;

            let now = Utc::now().naive_utc();
            let reports: Vec<NewSpamReport> = (0..rng.random_range(0..=15))
                .map(|_| NewSpamReport {
                    reported_by: user.id,
                    phone_number: fake_number(rng, &registered),
                    created_at: now,
                })
                .collect();
            if !reports.is_empty() {
                SpamRepository::create_many(conn, &reports)?;
            }

            seeded.push(SeededUser {
                tokens: tokens.issue_pair(user.id)?,
                contacts: contacts.len(),
                spam_reports: reports.len(),
                user,
            });
        }

        Ok(seeded)
    })
}

fn fake_name<R: Rng>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Kumar");
    format!("{first} {last}")
}

fn random_number<R: Rng>(rng: &mut R, leading: &[char]) -> String {
    let mut number = String::with_capacity(10);
    number.push(leading.choose(rng).copied().unwrap_or('9'));
    for _ in 0..9 {
        number.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
    number
}

/// Mostly unknown numbers, sometimes one of the seeded users.
fn fake_number<R: Rng>(rng: &mut R, registered: &[String]) -> String {
    if rng.random_bool(0.3) {
        if let Some(number) = registered.choose(rng) {
            return number.clone();
        }
    }
    random_number(rng, &['6', '7', '8', '9'])
}

fn unused_user_number<R: Rng>(
    conn: &mut SqliteConnection,
    taken: &mut HashSet<String>,
    rng: &mut R,
) -> AppResult<String> {
    for _ in 0..MAX_NUMBER_ATTEMPTS {
        let candidate = random_number(rng, &['7', '8', '9']);
        if taken.contains(&candidate) || UserRepository::phone_number_taken(conn, &candidate)? {
            continue;
        }
        taken.insert(candidate.clone());
        return Ok(candidate);
    }
    Err(AppError::Internal("Could not find an unused phone number".to_string()))
}
