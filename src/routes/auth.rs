use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, SESSION_COOKIE},
    error::AppError,
    state::AppState,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates the account, opens a session for it and sets the session cookie.
///
/// ## Responses:
/// - `200 OK`: `user` and `token` are set.
/// - `400 Bad Request`: a field is missing or invalid, or the username/email is taken.
/// - `500 Internal Server Error`: storage failure.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    if !register_data.has_required_fields() {
        return Err(AppError::BadRequest(
            "Username, email, and password are required".into(),
        ));
    }
    register_data.validate()?;

    // Presence was checked above.
    let username = register_data.username.as_deref().unwrap_or_default();
    let email = register_data.email.as_deref().unwrap_or_default();
    let password = register_data.password.as_deref().unwrap_or_default();

    if state.db.find_user_by_username(username).await?.is_some() {
        return Err(AppError::BadRequest("Username already exists".into()));
    }
    if state.db.find_user_by_email(email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = state.hasher.hash(password);
    let user = state.db.create_user(username, email, &password_hash).await?;
    log::info!("registered user {} ({})", user.id, user.username);

    // Not in a transaction with the insert above: if this fails the account
    // exists without a session and the client recovers by logging in.
    let token = state.sessions.issue(user.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(state.cookies.session_cookie(&token))
        .json(AuthResponse::with_session(
            "User registered successfully",
            user,
            token,
        )))
}

/// Login user
///
/// Checks the credentials, opens a new session and sets the session cookie.
/// Existing sessions of the user stay valid.
///
/// ## Responses:
/// - `200 OK`: `user` and `token` are set.
/// - `400 Bad Request`: username or password missing.
/// - `401 Unauthorized`: unknown username or wrong password.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (username, password) = login_data
        .credentials()
        .ok_or_else(|| AppError::BadRequest("Username and password are required".into()))?;

    let user = match state.db.find_user_by_username(username).await? {
        Some(user) if state.hasher.verify(password, &user.password_hash) => user,
        _ => {
            log::debug!("failed login for {:?}", username);
            return Err(AppError::Unauthorized(
                "Invalid username or password".into(),
            ));
        }
    };

    let token = state.sessions.issue(user.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(state.cookies.session_cookie(&token))
        .json(AuthResponse::with_session(
            "Login successful",
            user.into(),
            token,
        )))
}

/// Logout user
///
/// Deletes the session named by the cookie, if any, and clears the cookie.
/// Succeeds even without a session.
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(state.cookies.removal_cookie())
        .json(AuthResponse::message("Logged out successfully")))
}

/// Current user
///
/// ## Responses:
/// - `200 OK`: `user` is the owner of the session cookie.
/// - `401 Unauthorized`: no cookie, or the session is unknown or expired
///   (the cookie is cleared in that case).
/// - `404 Not Found`: the session outlived its user.
#[get("/me")]
pub async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let token = req
        .cookie(SESSION_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

    let user_id = match state.sessions.resolve(token.value()).await? {
        Some(user_id) => user_id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .cookie(state.cookies.removal_cookie())
                .json(AuthResponse {
                    success: false,
                    ..AuthResponse::message("Invalid or expired session")
                }))
        }
    };

    let user = state
        .db
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(AuthResponse::with_user("User authenticated", user)))
}
