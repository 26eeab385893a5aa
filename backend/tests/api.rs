mod common;

use axum::http::StatusCode;
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};

use callerid::models::spam_models::NewSpamReport;
use callerid::repositories::{ContactRepository, SpamRepository, UserRepository};
use callerid::services::seed::{self, SeedOptions};
use common::*;

fn names(results: &Value) -> Vec<&str> {
    results["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn spam_reports_are_counted() {
    let (_, app) = test_app();
    let (access, _) = signed_in(&app, "Asha", "9876543210", None).await;

    let (status, body) = get(&app, "/api/spam-counter?phone_number=9111111111", Some(&access)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No spam reports found for this phone number.");
    assert!(body.get("spam_count").is_none());

    let (status, body) = post_json(&app, "/api/spam-report", Some(&access), json!({"phone_number": "9111111111"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Spam report for 9111111111 created successfully.");

    let (status, body) = get(&app, "/api/spam-counter?phone_number=9111111111", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spam_count"], 1);
    assert_eq!(body["message"], "1 spam reports found for this phone number.");

    // Repeat reports from the same user are all counted.
    post_json(&app, "/api/spam-report", Some(&access), json!({"phone_number": "9111111111"})).await;
    let (_, body) = get(&app, "/api/spam-counter?phone_number=9111111111", Some(&access)).await;
    assert_eq!(body["spam_count"], 2);
}

#[tokio::test]
async fn spam_endpoints_require_a_number() {
    let (_, app) = test_app();
    let (access, _) = signed_in(&app, "Asha", "9876543210", None).await;

    let (status, body) = post_json(&app, "/api/spam-report", Some(&access), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Phone number is required.");

    let (status, _) = get(&app, "/api/spam-counter", Some(&access)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/spam-report", None, json!({"phone_number": "9111111111"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn name_search_ranks_users_then_contacts() {
    let (state, app) = test_app();
    let (access, _) = signed_in(&app, "Alice Smith", "9000000001", None).await;
    signed_in(&app, "Salman Khan", "9000000002", None).await;
    signed_in(&app, "Bob Stone", "9000000003", None).await;
    add_contact(&state, "9000000003", "Kalpana", "8111111111");
    add_contact(&state, "9000000003", "albert", "8222222222");

    post_json(&app, "/api/spam-report", Some(&access), json!({"phone_number": "9000000002"})).await;

    let (status, body) = get(&app, "/api/search-by-name?name=al", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Alice Smith", "Salman Khan", "albert", "Kalpana"]);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["spam_likelihood"], "Unknown");
    assert_eq!(results[1]["spam_likelihood"], "Spam");
    assert_eq!(results[1]["phone_number"], "9000000002");
    assert_eq!(results[3]["phone_number"], "8111111111");
}

#[tokio::test]
async fn name_search_treats_wildcards_literally() {
    let (state, app) = test_app();
    let (access, _) = signed_in(&app, "Asha Rao", "9000000001", None).await;
    add_contact(&state, "9000000001", "100% Genuine", "8111111111");
    add_contact(&state, "9000000001", "Plumber_Ravi", "8222222222");

    let (_, body) = get(&app, "/api/search-by-name?name=%25", Some(&access)).await;
    assert_eq!(names(&body), ["100% Genuine"]);

    let (_, body) = get(&app, "/api/search-by-name?name=_", Some(&access)).await;
    assert_eq!(names(&body), ["Plumber_Ravi"]);

    let (_, body) = get(&app, "/api/search-by-name?name=zzz", Some(&access)).await;
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn name_search_folds_non_ascii_case() {
    let (state, app) = test_app();
    let (access, _) = signed_in(&app, "ÉMILE Zola", "9000000001", None).await;
    add_contact(&state, "9000000001", "Émile Dubois", "8111111111");
    add_contact(&state, "9000000001", "émile lower", "8222222222");
    add_contact(&state, "9000000001", "Emile Plain", "8333333333");

    // "émile" and "ÉMILE", percent-encoded.
    for uri in ["/api/search-by-name?name=%C3%A9mile", "/api/search-by-name?name=%C3%89MILE"] {
        let (status, body) = get(&app, uri, Some(&access)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(names(&body), ["ÉMILE Zola", "Émile Dubois", "émile lower"], "{uri}");
    }

    let (_, body) = get(&app, "/api/search-by-name?name=%C3%89", Some(&access)).await;
    assert_eq!(names(&body), ["ÉMILE Zola", "Émile Dubois", "émile lower"]);
}

#[tokio::test]
async fn name_search_requires_a_query() {
    let (_, app) = test_app();
    let (access, _) = signed_in(&app, "Asha", "9876543210", None).await;

    for uri in ["/api/search-by-name", "/api/search-by-name?name="] {
        let (status, body) = get(&app, uri, Some(&access)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Name query parameter is required.");
    }
}

#[tokio::test]
async fn number_search_prefers_registered_user() {
    let (state, app) = test_app();
    let (access, _) = signed_in(&app, "Asha Rao", "9000000001", None).await;
    signed_in(&app, "Ravi Kumar", "9000000002", None).await;
    add_contact(&state, "9000000002", "Asha from work", "9000000001");
    add_contact(&state, "9000000001", "Plumber", "8111111111");
    add_contact(&state, "9000000002", "Plumber Ravi", "8111111111");

    let (status, body) = get(&app, "/api/search-by-number?phone_number=9000000001", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User found.", "name": "Asha Rao", "phone_number": "9000000001"}));

    let (status, body) = get(&app, "/api/search-by-number?phone_number=8111111111", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contacts found.");
    let mut found = names(&body);
    found.sort_unstable();
    assert_eq!(found, ["Plumber", "Plumber Ravi"]);

    let (status, body) = get(&app, "/api/search-by-number?phone_number=7000000000", Some(&access)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No results found for this phone number.");

    let (status, _) = get(&app, "/api/search-by-number", Some(&access)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn display_detail_discloses_email_to_contacts_only() {
    let (state, app) = test_app();
    let (owner, _) = signed_in(&app, "Asha Rao", "9000000001", Some("asha@example.com")).await;
    let (friend, _) = signed_in(&app, "Ravi Kumar", "9000000002", None).await;
    let (stranger, _) = signed_in(&app, "Meera Iyer", "9000000003", None).await;
    add_contact(&state, "9000000002", "Asha", "9000000001");

    post_json(&app, "/api/spam-report", Some(&stranger), json!({"phone_number": "9000000001"})).await;

    let (status, body) = get(&app, "/api/display-detail?phone_number=9000000001", Some(&friend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "phone_number": "9000000001",
            "spam_likelihood": 1,
            "name": "Asha Rao",
            "email": "asha@example.com",
        })
    );

    let (_, body) = get(&app, "/api/display-detail?phone_number=9000000001", Some(&stranger)).await;
    assert_eq!(body["name"], "Asha Rao");
    assert!(body["email"].is_null());
    assert!(body.as_object().unwrap().contains_key("email"));

    let (status, body) = get(&app, "/api/display-detail?phone_number=8111111111", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"phone_number": "8111111111", "spam_likelihood": 0}));
}

#[tokio::test]
async fn deleting_a_user_removes_their_data() {
    let (state, app) = test_app();
    let (access, _) = signed_in(&app, "Asha Rao", "9000000001", None).await;
    add_contact(&state, "9000000001", "Plumber", "8111111111");
    post_json(&app, "/api/spam-report", Some(&access), json!({"phone_number": "8222222222"})).await;

    {
        let conn = &mut state.pool.get().unwrap();
        let user = UserRepository::find_by_phone_number(conn, "9000000001").unwrap().unwrap();
        assert_eq!(UserRepository::delete(conn, user.id).unwrap(), 1);

        assert!(UserRepository::find_by_id(conn, user.id).unwrap().is_none());
        assert!(ContactRepository::for_owner(conn, user.id).unwrap().is_empty());
        assert!(SpamRepository::by_reporter(conn, user.id).unwrap().is_empty());
        assert_eq!(SpamRepository::count_for(conn, "8222222222").unwrap(), 0);
    }

    // Tokens of a deleted account stop working.
    let (status, _) = get(&app, "/api/spam-counter?phone_number=8222222222", Some(&access)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn seeded_users_can_sign_in() {
    let (state, app) = test_app();

    let seeded = {
        let conn = &mut state.pool.get().unwrap();
        let options = SeedOptions {
            users: 4,
            password: PASSWORD.to_string(),
            bcrypt_cost: 4,
        };
        seed::populate_with(conn, &state.tokens, &options, &mut StdRng::seed_from_u64(7)).unwrap()
    };
    assert_eq!(seeded.len(), 4);

    {
        let conn = &mut state.pool.get().unwrap();
        for entry in &seeded {
            assert!((1..=10).contains(&entry.contacts));
            assert!(entry.spam_reports <= 15);
            assert_eq!(ContactRepository::for_owner(conn, entry.user.id).unwrap().len(), entry.contacts);
            assert_eq!(SpamRepository::by_reporter(conn, entry.user.id).unwrap().len(), entry.spam_reports);
        }
    }

    let first = &seeded[0];
    let (status, _) = post_json(
        &app,
        "/auth/login",
        None,
        json!({"phone_number": first.user.phone_number, "password": PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/search-by-number?phone_number={}", first.user.phone_number);
    let (status, body) = get(&app, &uri, Some(&first.tokens.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], first.user.name.as_str());
}

#[tokio::test]
async fn created_rows_come_back_with_their_ids() {
    let (state, app) = test_app();
    signed_in(&app, "Asha Rao", "9000000001", None).await;
    signed_in(&app, "Ravi Kumar", "9000000002", None).await;

    let conn = &mut state.pool.get().unwrap();
    let asha = UserRepository::find_by_phone_number(conn, "9000000001").unwrap().unwrap();
    let ravi = UserRepository::find_by_phone_number(conn, "9000000002").unwrap().unwrap();
    assert_ne!(asha.id, ravi.id);
    assert_eq!(UserRepository::find_by_id(conn, ravi.id).unwrap().unwrap().name, "Ravi Kumar");

    let first = SpamRepository::create(
        conn,
        &NewSpamReport {
            reported_by: ravi.id,
            phone_number: "8111111111".to_string(),
            created_at: Utc::now().naive_utc(),
        },
    )
    .unwrap();
    let second = SpamRepository::create(
        conn,
        &NewSpamReport {
            reported_by: asha.id,
            phone_number: "8222222222".to_string(),
            created_at: Utc::now().naive_utc(),
        },
    )
    .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.reported_by, ravi.id);
    assert_eq!(first.phone_number, "8111111111");
    assert_eq!(second.reported_by, asha.id);

    let by_ravi = SpamRepository::by_reporter(conn, ravi.id).unwrap();
    assert_eq!(by_ravi.len(), 1);
    assert_eq!(by_ravi[0].id, first.id);
}
