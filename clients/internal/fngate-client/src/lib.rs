// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! fngate Gateway Client Library
//!
//! Hand-written, typed client for the fngate functions gateway HTTP API.
//! The central operation is listing deployed functions with
//! client-controlled redirect following:
//!
//! - the underlying transport never chases redirects itself;
//! - 307/308 responses are re-issued against the `Location` value
//!   verbatim, up to a fixed hop ceiling;
//! - 401 and unexpected statuses terminate immediately with typed errors.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use fngate_client::{Auth, Client};
//! use tokio_util::sync::CancellationToken;
//! use url::Url;
//!
//! let gateway = Url::parse("http://127.0.0.1:8080")?;
//! let client = Client::new(gateway, &Auth::None, Duration::from_secs(60))?;
//!
//! let cancel = CancellationToken::new();
//! let functions = client.list_functions(&cancel, Some("dev")).await?;
//! for f in &functions {
//!     println!("{}", f.name);
//! }
//! ```
//!
//! The transport seam is the [`RequestIssuer`] trait; tests substitute a
//! scripted issuer, production uses [`ReqwestIssuer`] (built with
//! redirect following disabled).

pub mod client;
pub mod error;
pub mod issuer;
pub mod types;

pub use client::{Client, MAX_REDIRECTS, NAMESPACE_KEY, SYSTEM_FUNCTIONS_PATH};
pub use error::GatewayError;
pub use issuer::{Auth, IssueError, IssuedResponse, ReqwestIssuer, RequestIssuer};
pub use types::FunctionStatus;
