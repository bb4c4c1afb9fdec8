// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Gateway client and the bounded redirect-following listing loop

use std::time::Duration;

use http::{Method, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::GatewayError;
use crate::issuer::{Auth, IssueError, ReqwestIssuer, RequestIssuer};
use crate::types::FunctionStatus;

/// Well-known gateway path for the function listing endpoint.
pub const SYSTEM_FUNCTIONS_PATH: &str = "/system/functions";

/// Query-parameter key for scoping a listing to one namespace.
pub const NAMESPACE_KEY: &str = "namespace";

/// Redirect-hop ceiling for one listing call. The attempt counter must
/// not exceed this, so at most `MAX_REDIRECTS + 1` requests go out.
pub const MAX_REDIRECTS: u32 = 6;

/// How many characters of a response body to quote in decode errors.
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for the fngate gateway API.
///
/// Holds the gateway identity and a [`RequestIssuer`]; all other state is
/// local to each call. Cloning is not needed - the client is `Sync` and
/// calls take `&self`.
pub struct Client<I: RequestIssuer = ReqwestIssuer> {
    gateway: Url,
    issuer: I,
}

impl Client<ReqwestIssuer> {
    /// Create a client talking to `gateway` with the given credentials
    /// and per-request timeout.
    pub fn new(gateway: Url, auth: &Auth, timeout: Duration) -> Result<Self, GatewayError> {
        let issuer = ReqwestIssuer::new(gateway.clone(), auth, timeout).map_err(|e| {
            GatewayError::Connection {
                gateway: gateway.to_string(),
                source: e,
            }
        })?;
        Ok(Self::with_issuer(gateway, issuer))
    }
}

impl<I: RequestIssuer> Client<I> {
    /// Create a client over an arbitrary issuer.
    pub fn with_issuer(gateway: Url, issuer: I) -> Self {
        Self { gateway, issuer }
    }

    /// The gateway this client talks to.
    pub fn gateway(&self) -> &Url {
        &self.gateway
    }

    /// List deployed functions, optionally scoped to one namespace.
    ///
    /// Follows 307/308 redirects itself, re-issuing the request against
    /// the `Location` value verbatim. The namespace parameter is applied
    /// to the initial target only; a redirect is authoritative about the
    /// next URL. The loop gives up once the attempt counter exceeds
    /// [`MAX_REDIRECTS`].
    ///
    /// Attempts are strictly sequential; `cancel` is observed before and
    /// during every attempt, and cancellation surfaces as
    /// [`GatewayError::Connection`].
    pub async fn list_functions(
        &self,
        cancel: &CancellationToken,
        namespace: Option<&str>,
    ) -> Result<Vec<FunctionStatus>, GatewayError> {
        let mut target = SYSTEM_FUNCTIONS_PATH.to_string();
        if let Some(ns) = namespace.filter(|ns| !ns.is_empty()) {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair(NAMESPACE_KEY, ns)
                .finish();
            target = format!("{target}?{query}");
        }

        let mut attempts: u32 = 0;
        loop {
            if attempts > MAX_REDIRECTS {
                return Err(GatewayError::TooManyRedirects {
                    attempts,
                    gateway: self.gateway.to_string(),
                });
            }
            attempts += 1;

            if cancel.is_cancelled() {
                return Err(self.connection_error(IssueError::Cancelled));
            }

            let response = tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(self.connection_error(IssueError::Cancelled));
                }
                sent = self.issuer.send(Method::GET, &target) => {
                    sent.map_err(|e| self.connection_error(e))?
                }
            };

            let status = response.status();
            tracing::debug!(
                attempt = attempts,
                location = %target,
                status = %status,
                "gateway response"
            );

            match status {
                StatusCode::OK => {
                    let body = response
                        .into_body()
                        .map_err(|e| self.connection_error(e))?;
                    return serde_json::from_slice(&body).map_err(|e| GatewayError::Decode {
                        gateway: self.gateway.to_string(),
                        detail: format!("{e}; body: {}", excerpt(&body)),
                    });
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(GatewayError::AuthRequired {
                        gateway: self.gateway.to_string(),
                    });
                }
                StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => {
                    // A redirect without a usable Location header cannot be
                    // followed; classify it like any other unexpected status.
                    match response.location() {
                        Some(next) => target = next.to_string(),
                        None => {
                            return Err(GatewayError::UnexpectedStatus {
                                status: status.as_u16(),
                                body: None,
                            });
                        }
                    }
                }
                other => {
                    tracing::warn!(status = %other, "gateway returned unexpected status");
                    // Best effort: a failed diagnostic body read drops the
                    // text but never changes the error kind.
                    let body = response
                        .into_body()
                        .ok()
                        .map(|b| String::from_utf8_lossy(&b).into_owned());
                    return Err(GatewayError::UnexpectedStatus {
                        status: other.as_u16(),
                        body,
                    });
                }
            }
        }
    }

    fn connection_error(&self, source: IssueError) -> GatewayError {
        GatewayError::Connection {
            gateway: self.gateway.to_string(),
            source,
        }
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > BODY_EXCERPT_CHARS {
        let cut: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        text.into_owned()
    }
}
