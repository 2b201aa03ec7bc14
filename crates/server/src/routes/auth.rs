use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use service::auth::domain::{AuthUser, Claims, LoginInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{decode_token, AuthConfig, AuthService};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub token: String,
}

fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    AuthService::new(
        Arc::new(SeaOrmAuthRepository::new(state.db.clone())),
        AuthConfig { jwt_secret: Some(state.auth.jwt_secret.clone()) },
    )
}

/// Token from `Authorization: Bearer …`, falling back to the `auth_token`
/// cookie. Missing token and malformed scheme are distinguished because the
/// former maps to 400 and the latter to 401.
fn token_from_headers(headers: &HeaderMap) -> Result<String, JsonApiError> {
    if let Some(h) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let prefix = "Bearer ";
        if !h.starts_with(prefix) {
            tracing::warn!(authz = %h, "invalid Authorization format (expect Bearer)");
            return Err(JsonApiError::new(
                StatusCode::UNAUTHORIZED,
                "Invalid Token",
                Some("expected Bearer scheme".into()),
            ));
        }
        return Ok(h[prefix.len()..].to_string());
    }

    let cookie_header =
        headers.get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    for part in cookie_header.split(';') {
        if let Some(rest) = part.trim().strip_prefix("auth_token=") {
            if !rest.is_empty() {
                return Ok(rest.to_string());
            }
        }
    }

    tracing::warn!("missing Authorization header and auth_token cookie");
    Err(JsonApiError::new(
        StatusCode::BAD_REQUEST,
        "Missing Token",
        Some("no Authorization header or auth_token cookie".into()),
    ))
}

fn authorize(
    state: &ServerState,
    headers: &HeaderMap,
    required_role: Option<&str>,
) -> Result<Claims, StatusCode> {
    let token = token_from_headers(headers).map_err(|e| e.status)?;
    let claims = decode_token(&state.auth.jwt_secret, &token).map_err(|e| {
        tracing::warn!(code = e.code(), err = %e, "token validation failed");
        StatusCode::UNAUTHORIZED
    })?;
    if let Some(role) = required_role {
        if !claims.has_role(role) {
            tracing::warn!(user = %claims.sub, role, "required role missing");
            return Err(StatusCode::FORBIDDEN);
        }
    }
    Ok(claims)
}

/// Route middleware: any authenticated user.
/// Missing token -> 400, invalid or expired -> 401.
pub async fn require_user(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = authorize(&state, req.headers(), None)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Route middleware: authenticated user carrying the ADMIN role.
/// Valid token without the role -> 403.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = authorize(&state, req.headers(), Some("ADMIN"))?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = auth_service(&state).login(input).await?;
    let user = session.user;
    let token = session.token.ok_or_else(|| {
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Token Generation Failed", None)
    })?;

    let mut cookie = Cookie::new("auth_token", token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginOutput {
        id: user.id,
        name: user.name,
        email: user.email,
        roles: user.roles,
        token,
    };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth",
    responses((status = 204, description = "Logged Out"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    // Removal only matches the stored cookie when the path agrees
    let mut removal = Cookie::from("auth_token");
    removal.set_path("/");
    let jar = jar.remove(removal);
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth",
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Missing Token"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<AuthUser>, JsonApiError> {
    let token = token_from_headers(&headers)?;
    let user = auth_service(&state).current_user(&token).await?;
    Ok(Json(user))
}
