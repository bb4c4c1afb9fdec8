// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request issuer abstraction
//!
//! One attempt of the listing loop is one [`RequestIssuer::send`] call:
//! build a request against the current target location, send it, and hand
//! back the raw status, headers, and body. Issuers must not follow
//! redirects themselves - the loop in [`crate::client`] owns redirect
//! handling and needs to observe raw 3xx responses.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use thiserror::Error;
use url::Url;

/// Failure to produce a response for a single attempt.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The caller's cancellation token fired
    #[error("operation cancelled")]
    Cancelled,

    /// The target location could not be resolved against the gateway URL
    #[error("invalid target location \"{location}\": {detail}")]
    Location { location: String, detail: String },

    /// Connection refused, DNS failure, timeout, or a broken body stream
    #[error("transport error: {0}")]
    Transport(String),
}

/// Raw response from a single attempt.
///
/// The body is read eagerly by the issuer, so an `IssuedResponse` holds no
/// live connection resources; dropping it releases everything. A failed
/// body read is carried alongside the status rather than replacing it, so
/// the loop can still classify the response.
#[derive(Debug)]
pub struct IssuedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Result<Bytes, IssueError>,
}

impl IssuedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Result<Bytes, IssueError>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The `Location` header value, verbatim, if present and valid text.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Consume the response, yielding the body bytes or the read failure.
    pub fn into_body(self) -> Result<Bytes, IssueError> {
        self.body
    }
}

/// Sends one HTTP request and returns the raw response.
///
/// This is the seam between the redirect loop and the transport; tests
/// substitute a scripted implementation.
#[async_trait]
pub trait RequestIssuer: Send + Sync {
    async fn send(&self, method: Method, location: &str) -> Result<IssuedResponse, IssueError>;
}

/// Gateway credentials applied to every attempt.
#[derive(Debug, Clone, Default)]
pub enum Auth {
    /// No Authorization header
    #[default]
    None,
    /// HTTP Basic credentials
    Basic { username: String, password: String },
    /// Bearer token
    Token(String),
}

impl Auth {
    fn header_value(&self) -> Option<Result<HeaderValue, http::header::InvalidHeaderValue>> {
        match self {
            Auth::None => None,
            Auth::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}").as_bytes());
                Some(HeaderValue::from_str(&format!("Basic {encoded}")))
            }
            Auth::Token(token) => Some(HeaderValue::from_str(&format!("Bearer {token}"))),
        }
    }
}

/// Production issuer backed by `reqwest`.
///
/// Redirect following is disabled on the underlying client so raw 3xx
/// responses reach the loop. Relative target locations are resolved
/// against the gateway base URL at send time; the loop still tracks the
/// verbatim location string.
pub struct ReqwestIssuer {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestIssuer {
    pub fn new(base: Url, auth: &Auth, timeout: Duration) -> Result<Self, IssueError> {
        let mut headers = HeaderMap::new();
        if let Some(value) = auth.header_value() {
            let value =
                value.map_err(|e| IssueError::Transport(format!("invalid auth header: {e}")))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(concat!("fngate-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| IssueError::Transport(e.to_string()))?;

        Ok(Self { base, client })
    }
}

#[async_trait]
impl RequestIssuer for ReqwestIssuer {
    async fn send(&self, method: Method, location: &str) -> Result<IssuedResponse, IssueError> {
        let url = self.base.join(location).map_err(|e| IssueError::Location {
            location: location.to_string(),
            detail: e.to_string(),
        })?;

        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(|e| IssueError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| IssueError::Transport(e.to_string()));

        Ok(IssuedResponse::new(status, headers, body))
    }
}
