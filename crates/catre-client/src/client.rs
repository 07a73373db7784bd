// crates/catre-client/src/client.rs
// ============================================================================
// Module: CATRE HTTP Client
// Description: Request building and typed operations for the CATRE API.
// Purpose: Issue GET/POST calls with encoded parameters and decode replies.
// Dependencies: reqwest, url, serde_json
// ============================================================================

//! ## Overview
//! GET requests carry URL-encoded query parameters; POST requests carry a
//! JSON object body assembled from an ordered list of key/value pairs. Each
//! call blocks (asynchronously) until a reply or a connection failure, and
//! failures are fatal for the calling scenario: data calls are never
//! retried here. Readiness retries belong to the harness polling layer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::auth::PasswordDigest;
use crate::error::ClientError;
use crate::reply::ServerReply;
use crate::reply::SessionToken;

// ============================================================================
// SECTION: Wire Keys
// ============================================================================

/// Wire key for the session token.
const KEY_SESSION: &str = "CATRESESSION";
/// Wire key for the challenge salt.
const KEY_SALT: &str = "SALT";
/// Wire key for the bridge type tag.
const KEY_BRIDGE: &str = "BRIDGE";

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP/JSON client for one CATRE server.
#[derive(Debug, Clone)]
pub struct CatreClient {
    /// Root URL the routes are resolved against.
    base_url: Url,
    /// Shared reqwest client with a bounded request timeout.
    client: reqwest::Client,
}

impl CatreClient {
    /// Creates a client for a server base URL with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL does not parse or the underlying
    /// HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            route: base_url.to_string(),
            source,
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Build {
                source,
            })?;
        Ok(Self {
            base_url,
            client,
        })
    }

    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Raw request helpers
    // ------------------------------------------------------------------

    /// Issues a GET request with URL-encoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn get(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<ServerReply, ClientError> {
        let mut url = self.endpoint(route)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        let response =
            self.client.get(url.clone()).send().await.map_err(|source| ClientError::Transport {
                method: "GET",
                url: url.to_string(),
                source,
            })?;
        decode_reply(url, response).await
    }

    /// Issues a POST request with a JSON object body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn post(&self, route: &str, body: &Value) -> Result<ServerReply, ClientError> {
        let url = self.endpoint(route)?;
        let response = self.client.post(url.clone()).json(body).send().await.map_err(|source| {
            ClientError::Transport {
                method: "POST",
                url: url.to_string(),
                source,
            }
        })?;
        decode_reply(url, response).await
    }

    /// Resolves a route against the base URL.
    fn endpoint(&self, route: &str) -> Result<Url, ClientError> {
        self.base_url.join(route).map_err(|source| ClientError::InvalidUrl {
            route: route.to_string(),
            source,
        })
    }

    // ------------------------------------------------------------------
    // Typed operations
    // ------------------------------------------------------------------

    /// Probes `GET /ping` for liveness.
    ///
    /// The real server answers with a fixed pseudo-JSON body, so only the
    /// HTTP status is inspected here.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn ping(&self) -> Result<(), ClientError> {
        let url = self.endpoint("/ping")?;
        let response =
            self.client.get(url.clone()).send().await.map_err(|source| ClientError::Transport {
                method: "GET",
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::PingStatus {
                status: status.as_u16(),
            })
        }
    }

    /// Issues `GET /login` to obtain a fresh session token and salt.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn prelogin(&self) -> Result<ServerReply, ClientError> {
        self.get("/login", &[]).await
    }

    /// Issues `POST /login` with the salted password digest.
    ///
    /// The `session` and `salt` must come from the same preceding
    /// `GET /login` exchange; the salted digest is bound to that salt.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn login(
        &self,
        session: &SessionToken,
        salt: &str,
        username: &str,
        salted_digest: &str,
    ) -> Result<ServerReply, ClientError> {
        let body = body_from_pairs(&[
            (KEY_SESSION, session.as_str()),
            (KEY_SALT, salt),
            ("username", username),
            ("password", salted_digest),
        ]);
        self.post("/login", &body).await
    }

    /// Issues `POST /register` for a new user account.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ServerReply, ClientError> {
        self.post("/register", &request.body()).await
    }

    /// Issues `GET /logout` for a session.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn logout(&self, session: &SessionToken) -> Result<ServerReply, ClientError> {
        self.get("/logout", &[(KEY_SESSION, session.as_str())]).await
    }

    /// Issues `POST /removeuser` for the session's user.
    ///
    /// A successful call invalidates the session: subsequent requests with
    /// the same token are rejected by the server.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn remove_user(&self, session: &SessionToken) -> Result<ServerReply, ClientError> {
        let body = body_from_pairs(&[(KEY_SESSION, session.as_str())]);
        self.post("/removeuser", &body).await
    }

    /// Issues `POST /bridge/add` to register an external integration.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn add_bridge(
        &self,
        session: &SessionToken,
        request: &BridgeRequest,
    ) -> Result<ServerReply, ClientError> {
        self.post("/bridge/add", &request.body(session)).await
    }

    /// Issues `GET /universe` for the session's universe description.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn universe(&self, session: &SessionToken) -> Result<ServerReply, ClientError> {
        self.get("/universe", &[(KEY_SESSION, session.as_str())]).await
    }

    /// Issues `POST /universe/discover` to trigger device discovery.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    pub async fn discover(&self, session: &SessionToken) -> Result<ServerReply, ClientError> {
        let body = body_from_pairs(&[(KEY_SESSION, session.as_str())]);
        self.post("/universe/discover", &body).await
    }
}

/// Decodes an HTTP response into a [`ServerReply`].
async fn decode_reply(url: Url, response: reqwest::Response) -> Result<ServerReply, ClientError> {
    response.json::<ServerReply>().await.map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Builds a JSON object body from an ordered list of key/value pairs.
fn body_from_pairs(pairs: &[(&str, &str)]) -> Value {
    let mut map = Map::new();
    for (key, value) in pairs {
        map.insert((*key).to_string(), Value::String((*value).to_string()));
    }
    Value::Object(map)
}

// ============================================================================
// SECTION: Request Builders
// ============================================================================

/// Parameters for `POST /register`.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Session to register under, when the caller already holds one.
    session: Option<SessionToken>,
    /// Account username.
    username: String,
    /// Account email address.
    email: String,
    /// Pre-salt password digest (`hash(hash(password) + username)`).
    password_digest: String,
    /// Name for the account's initial universe.
    universe: String,
}

impl RegisterRequest {
    /// Creates a registration request for a new account.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        digest: &PasswordDigest,
        universe: impl Into<String>,
    ) -> Self {
        Self {
            session: None,
            username: username.into(),
            email: email.into(),
            password_digest: digest.stored().to_string(),
            universe: universe.into(),
        }
    }

    /// Attaches an existing session token to the registration.
    #[must_use]
    pub fn with_session(mut self, session: SessionToken) -> Self {
        self.session = Some(session);
        self
    }

    /// Returns the wire body for the request.
    #[must_use]
    pub fn body(&self) -> Value {
        let mut map = Map::new();
        if let Some(session) = &self.session {
            map.insert(KEY_SESSION.to_string(), Value::String(session.as_str().to_string()));
        }
        map.insert("username".to_string(), Value::String(self.username.clone()));
        map.insert("email".to_string(), Value::String(self.email.clone()));
        map.insert("password".to_string(), Value::String(self.password_digest.clone()));
        map.insert("universe".to_string(), Value::String(self.universe.clone()));
        Value::Object(map)
    }
}

/// Parameters for `POST /bridge/add`.
#[derive(Debug, Clone)]
pub struct BridgeRequest {
    /// Bridge type tag (for example `generic` or `iqsign`).
    bridge: String,
    /// Ordered `AUTH_*` identifier pairs for the integration.
    auth: Vec<(String, String)>,
}

impl BridgeRequest {
    /// Creates a bridge request for an arbitrary bridge tag.
    #[must_use]
    pub fn new(bridge: impl Into<String>) -> Self {
        Self {
            bridge: bridge.into(),
            auth: Vec::new(),
        }
    }

    /// Appends an auth identifier pair (key must be its `AUTH_*` wire name).
    #[must_use]
    pub fn auth(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.auth.push((key.into(), value.into()));
        self
    }

    /// Builds the request for the generic bridge.
    #[must_use]
    pub fn generic(uid: impl Into<String>, pat: impl Into<String>) -> Self {
        Self::new("generic").auth("AUTH_UID", uid).auth("AUTH_PAT", pat)
    }

    /// Builds the request for the iQsign bridge.
    #[must_use]
    pub fn iqsign(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new("iqsign").auth("AUTH_UID", user).auth("AUTH_PAT", token)
    }

    /// Builds the request for the Google Calendar bridge.
    #[must_use]
    pub fn gcal(calendar_names: impl Into<String>) -> Self {
        Self::new("gcal").auth("AUTH_CALENDARS", calendar_names)
    }

    /// Builds the request for the SmartThings bridge.
    #[must_use]
    pub fn samsung(token: impl Into<String>) -> Self {
        Self::new("samsung").auth("AUTH_TOKEN", token)
    }

    /// Returns the bridge type tag.
    #[must_use]
    pub fn bridge(&self) -> &str {
        &self.bridge
    }

    /// Returns the wire body for the request.
    #[must_use]
    pub fn body(&self, session: &SessionToken) -> Value {
        let mut map = Map::new();
        map.insert(KEY_SESSION.to_string(), Value::String(session.as_str().to_string()));
        map.insert(KEY_BRIDGE.to_string(), Value::String(self.bridge.clone()));
        for (key, value) in &self.auth {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(map)
    }
}
