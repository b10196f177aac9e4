//! Session provider: OAuth 2.0 authorization-code flow
//!
//! The operator opens the authorize URL in a browser, the service redirects
//! back to a one-shot listener on the redirect URI, and the returned code is
//! exchanged for an access token. The token lives for this run only.

use crate::error::{Error, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Url;
use serde::Deserialize;
use splanto_common::Credentials;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex, Notify};

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Read the current user's private playlists
pub const SCOPE_READ_PRIVATE: &str = "playlist-read-private";
/// Modify the current user's private playlists
pub const SCOPE_MODIFY_PRIVATE: &str = "playlist-modify-private";

/// Default redirect URI registered for the application
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888";

const CALLBACK_PAGE: &str = "<html><body>splanto is authorized. You can close this tab.</body></html>";
const FAILED_PAGE: &str = "<html><body>splanto was not authorized. Check the terminal.</body></html>";
const WAITING_PAGE: &str = "<html><body>Waiting for an authorization response.</body></html>";

/// What to ask the service for
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub credentials: Credentials,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl SessionConfig {
    /// Config requesting the two playlist scopes curation needs
    pub fn new(credentials: Credentials, redirect_uri: impl Into<String>) -> Self {
        Self {
            credentials,
            redirect_uri: redirect_uri.into(),
            scopes: vec![
                SCOPE_READ_PRIVATE.to_string(),
                SCOPE_MODIFY_PRIVATE.to_string(),
            ],
        }
    }
}

/// An authenticated session
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    /// Scopes the service actually granted
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Acquires sessions from the accounts service
pub struct OAuthSessionProvider {
    http_client: reqwest::Client,
    authorize_url: String,
    token_url: String,
}

impl OAuthSessionProvider {
    pub fn new() -> Result<Self> {
        Self::with_endpoints(AUTHORIZE_URL, TOKEN_URL)
    }

    /// Provider talking to non-default endpoints
    pub fn with_endpoints(authorize_url: impl Into<String>, token_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            authorize_url: authorize_url.into(),
            token_url: token_url.into(),
        })
    }

    /// Run the full flow: print the URL, wait for the callback, exchange
    pub async fn get_session(&self, config: &SessionConfig) -> Result<Session> {
        let state = random_state();
        let url = self.authorize_url(config, &state)?;

        println!("Open this URL in your browser to authorize splanto:\n\n{}\n", url);

        let code = receive_callback(&config.redirect_uri, &state).await?;
        self.exchange_code(config, &code).await
    }

    /// URL the operator visits to grant consent
    pub fn authorize_url(&self, config: &SessionConfig, state: &str) -> Result<Url> {
        let scope = config.scopes.join(" ");
        Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", config.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| Error::AuthFailure(format!("invalid authorize URL: {}", e)))
    }

    /// Trade an authorization code for an access token
    pub async fn exchange_code(&self, config: &SessionConfig, code: &str) -> Result<Session> {
        tracing::debug!(url = %self.token_url, "Exchanging authorization code");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(
                &config.credentials.client_id,
                Some(&config.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| e.error_description.unwrap_or(e.error))
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            return Err(Error::AuthFailure(reason));
        }

        if !status.is_success() {
            return Err(Error::TransientServiceError(format!(
                "token endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::TransientServiceError(format!("invalid token response: {}", e)))?;

        let scopes = match token.scope {
            Some(scope) => scope.split_whitespace().map(str::to_string).collect(),
            None => config.scopes.clone(),
        };

        tracing::info!(scopes = ?scopes, "Authorized");

        Ok(Session {
            access_token: token.access_token,
            scopes,
        })
    }
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Query string the service appends to the redirect URI
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// True once the service has answered, with a code or with an error
    fn is_answer(&self) -> bool {
        self.code.is_some() || self.error.is_some()
    }
}

/// Shared between the callback handler and [`receive_callback`]
struct CallbackState {
    expected_state: String,
    sender: Mutex<Option<oneshot::Sender<Result<String>>>>,
    done: Notify,
}

/// Wait for the browser to hit the redirect URI and return the code
///
/// Only the redirect path is routed; anything else (favicon and the like)
/// gets a 404. Requests on the redirect path without `code` or `error` get a
/// 400. Neither ends the wait. There is no timeout.
pub async fn receive_callback(redirect_uri: &str, expected_state: &str) -> Result<String> {
    let redirect = Url::parse(redirect_uri)
        .map_err(|e| Error::AuthFailure(format!("invalid redirect URI {:?}: {}", redirect_uri, e)))?;
    let host = redirect
        .host_str()
        .ok_or_else(|| Error::AuthFailure(format!("redirect URI {:?} has no host", redirect_uri)))?;
    let port = redirect.port_or_known_default().unwrap_or(80);

    let (sender, receiver) = oneshot::channel();
    let state = Arc::new(CallbackState {
        expected_state: expected_state.to_string(),
        sender: Mutex::new(Some(sender)),
        done: Notify::new(),
    });

    let app = Router::new()
        .route(redirect.path(), get(handle_callback))
        .with_state(state.clone());

    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!(host = %host, port, "Waiting for authorization callback");

    let shutdown_state = state.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown_state.done.notified().await })
        .await?;

    receiver
        .await
        .map_err(|_| Error::AuthFailure("callback listener stopped without an answer".to_string()))?
}

async fn handle_callback(
    State(state): State<Arc<CallbackState>>,
    Query(params): Query<CallbackParams>,
) -> (StatusCode, Html<&'static str>) {
    if !params.is_answer() {
        tracing::debug!("Ignoring callback request without code or error");
        return (StatusCode::BAD_REQUEST, Html(WAITING_PAGE));
    }

    let outcome = authorization_code(params, &state.expected_state);
    let page = if outcome.is_ok() { CALLBACK_PAGE } else { FAILED_PAGE };

    if let Some(sender) = state.sender.lock().await.take() {
        let _ = sender.send(outcome);
        state.done.notify_one();
    }

    (StatusCode::OK, Html(page))
}

/// Pull the authorization code out of the callback parameters
///
/// `error=...` means the operator denied consent; a missing or different
/// `state` means the callback did not come from our authorize request.
pub fn authorization_code(params: CallbackParams, expected_state: &str) -> Result<String> {
    if let Some(error) = params.error {
        return Err(Error::AuthFailure(format!("consent not granted ({})", error)));
    }

    if params.state.as_deref() != Some(expected_state) {
        return Err(Error::AuthFailure("callback state does not match".to_string()));
    }

    params
        .code
        .ok_or_else(|| Error::AuthFailure("callback carried no authorization code".to_string()))
}
