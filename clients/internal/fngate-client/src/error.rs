// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for fngate-client

use thiserror::Error;

use crate::issuer::IssueError;

/// Errors returned by gateway operations.
///
/// Every variant carries enough context (gateway identity, status code,
/// attempt count) to log or display without re-querying the server.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The redirect-following loop hit its attempt ceiling
    #[error("too many redirects ({attempts}) from gateway {gateway}")]
    TooManyRedirects { attempts: u32, gateway: String },

    /// The gateway answered 401; retrying cannot help
    #[error("unauthorized access to gateway {gateway}, run \"fngate login\" to set up authentication")]
    AuthRequired { gateway: String },

    /// A status outside the handled set, with the body text when readable
    #[error("gateway returned unexpected status code: {status} - {}", .body.as_deref().unwrap_or("<body unreadable>"))]
    UnexpectedStatus { status: u16, body: Option<String> },

    /// A 200 body that could not be parsed as a function list
    #[error("cannot parse function list from gateway {gateway}: {detail}")]
    Decode { gateway: String, detail: String },

    /// Transport-level failure or cancellation before/while sending
    #[error("cannot connect to gateway {gateway}: {source}")]
    Connection {
        gateway: String,
        #[source]
        source: IssueError,
    },
}
