//! Registration and login.

use actix_web::{HttpResponse, web};

use pulse_core::domain::User;
use pulse_core::ports::{BaseRepository, UserRepository};
use pulse_core::session::is_encodable;
use pulse_infra::database::mask_email;
use pulse_shared::ApiResponse;
use pulse_shared::dto::{LoginRequest, LoginResponse, RegisterResponse, RegisterUserRequest};

use super::present;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /users/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(user_name), Some(email), Some(password)) = (
        present(req.user_name),
        present(req.email),
        present(req.password),
    ) else {
        return Err(AppError::MissingFields);
    };

    // The email is embedded in API keys, so it must not contain the key
    // delimiter.
    if !is_encodable(&email) {
        return Err(AppError::BadRequest(
            "email contains unsupported characters".to_string(),
        ));
    }

    // Pre-check only; two concurrent registrations can both pass it.
    if state.users.find_by_email(&email).await?.is_some() {
        tracing::debug!(user_email = %mask_email(&email), "Registration rejected: email taken");
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = state.passwords.hash(&password)?;
    let user = state
        .users
        .insert(User::new(user_name, email, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        RegisterResponse { user_id: user.id },
        "User registered successfully",
    )))
}

/// POST /users/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
        return Err(AppError::MissingFields);
    };

    let Some(user) = state.users.find_by_email(&email).await? else {
        // Spend the same hashing work as a real verify so response time
        // does not reveal whether the account exists.
        let _ = state.passwords.hash(&password);
        return Err(AppError::InvalidCredentials);
    };

    if !state.passwords.verify(&password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let api_key = state.sessions.mint(&user).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        LoginResponse { api_key },
        "Login successful",
    )))
}
