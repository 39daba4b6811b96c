use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

use crate::auth::credentials::CredentialStore;
use crate::error::ApiError;
use crate::models::{LoginReqDto, LoginResponse};

/// Log in with a portal account
///
/// No session or token is issued: the caller keeps the returned role and
/// scopes its record requests to that category.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse,
         example = json!({ "success": true, "role": "salaries" })),
        (status = 401, description = "Invalid credentials", body = Object,
         example = json!({ "success": false, "message": "Invalid credentials" }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(credentials, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    credentials: web::Data<CredentialStore>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let Some(role) = credentials.authenticate(&user.username, &user.password) else {
        info!("Invalid credentials");
        return Err(ApiError::InvalidCredentials);
    };

    info!(%role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        role,
    }))
}
