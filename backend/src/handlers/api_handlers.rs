use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    handlers::api_models::{
        DisplayDetailResponse, NameQuery, PhoneNumberQuery, SearchByNameResponse, SearchByNumberResponse,
        SpamCountResponse, SpamReportRequest,
    },
    handlers::auth_models::MessageResponse,
    handlers::{logged, reject},
    middleware::RequireAuth,
    services::{profile, search, search::NumberLookup, spam, spam::SpamCount},
    state::AppState,
};

pub async fn report_spam(
    State(state): State<AppState>,
    RequireAuth { user, .. }: RequireAuth,
    payload: Result<Json<SpamReportRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(report_req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject("report_spam", "", rejection.into()),
    };
    let phone_number = report_req.phone_number.unwrap_or_default();

    logged("report_spam", &phone_number, || {
        let conn = &mut state.pool.get()?;
        spam::report(conn, &user, &phone_number)
    })?;
    tracing::info!(%phone_number, reported_by = %user.phone_number, "Spam report created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Spam report for {phone_number} created successfully."),
        }),
    ))
}

pub async fn search_by_name(
    State(state): State<AppState>,
    _auth: RequireAuth,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> AppResult<Json<SearchByNameResponse>> {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("search_by_name", "", rejection.into()),
    };
    let name = params.name.unwrap_or_default();

    let results = logged("search_by_name", &name, || {
        let conn = &mut state.pool.get()?;
        search::search_by_name(conn, &name)
    })?;
    tracing::info!(query = %name, count = results.len(), "Search by name");

    Ok(Json(SearchByNameResponse { results }))
}

pub async fn search_by_number(
    State(state): State<AppState>,
    _auth: RequireAuth,
    query: Result<Query<PhoneNumberQuery>, QueryRejection>,
) -> AppResult<(StatusCode, Json<SearchByNumberResponse>)> {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("search_by_number", "", rejection.into()),
    };
    let phone_number = params.phone_number.unwrap_or_default();

    let lookup = logged("search_by_number", &phone_number, || {
        let conn = &mut state.pool.get()?;
        search::search_by_number(conn, &phone_number)
    })?;

    let status = match &lookup {
        NumberLookup::NotFound => {
            tracing::warn!(%phone_number, "No results found for phone number");
            StatusCode::NOT_FOUND
        }
        _ => {
            tracing::info!(%phone_number, "Phone number found");
            StatusCode::OK
        }
    };

    Ok((status, Json(lookup.into())))
}

pub async fn spam_counter(
    State(state): State<AppState>,
    _auth: RequireAuth,
    query: Result<Query<PhoneNumberQuery>, QueryRejection>,
) -> AppResult<(StatusCode, Json<SpamCountResponse>)> {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("spam_counter", "", rejection.into()),
    };
    let phone_number = params.phone_number.unwrap_or_default();

    let count = logged("spam_counter", &phone_number, || {
        let conn = &mut state.pool.get()?;
        spam::count(conn, &phone_number)
    })?;
    tracing::info!(%phone_number, ?count, "Spam report count");

    Ok(match count {
        SpamCount::Reported(n) => (
            StatusCode::OK,
            Json(SpamCountResponse {
                message: format!("{n} spam reports found for this phone number."),
                spam_count: Some(n),
            }),
        ),
        SpamCount::NoneFound => (
            StatusCode::NOT_FOUND,
            Json(SpamCountResponse {
                message: "No spam reports found for this phone number.".to_string(),
                spam_count: None,
            }),
        ),
    })
}

pub async fn display_detail(
    State(state): State<AppState>,
    RequireAuth { user, .. }: RequireAuth,
    query: Result<Query<PhoneNumberQuery>, QueryRejection>,
) -> AppResult<Json<DisplayDetailResponse>> {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("display_detail", "", rejection.into()),
    };
    let phone_number = params.phone_number.unwrap_or_default();

    let detail = logged("display_detail", &phone_number, || {
        let conn = &mut state.pool.get()?;
        profile::display_detail(conn, &user, &phone_number)
    })?;
    tracing::info!(
        %phone_number,
        registered = detail.owner.is_some(),
        spam_count = detail.spam_count,
        "Details response"
    );

    Ok(Json(detail.into()))
}
