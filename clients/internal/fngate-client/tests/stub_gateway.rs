// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Integration tests driving the real reqwest-backed issuer against a
//! local stub gateway, covering the paths a scripted issuer cannot:
//! actual HTTP transport, raw 3xx visibility, and query encoding on the
//! wire.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::extract::Query;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;

use fngate_client::{Auth, Client, GatewayError};

async fn start_stub(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    addr
}

fn client_for(addr: SocketAddr) -> Client {
    let gateway = Url::parse(&format!("http://{addr}")).expect("gateway url");
    Client::new(gateway, &Auth::None, Duration::from_secs(5)).expect("build client")
}

#[tokio::test]
async fn lists_functions_and_passes_namespace_on_the_wire() {
    async fn system_functions(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        let ns = params
            .get("namespace")
            .cloned()
            .unwrap_or_else(|| "none".to_string());
        Json(json!([
            {"name": "alpha", "namespace": ns, "replicas": 1},
            {"name": "beta", "namespace": ns, "replicas": 3},
        ]))
    }

    let addr = start_stub(Router::new().route("/system/functions", get(system_functions))).await;
    let client = client_for(addr);
    let cancel = CancellationToken::new();

    let functions = client
        .list_functions(&cancel, Some("staging"))
        .await
        .expect("list");

    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].name, "alpha");
    assert_eq!(functions[0].field_text("namespace").as_deref(), Some("staging"));
    assert_eq!(functions[1].field_text("replicas").as_deref(), Some("3"));
}

#[tokio::test]
async fn follows_raw_307_without_reappending_namespace() {
    // The initial endpoint redirects; the alternate endpoint reports the
    // namespace it actually received. If reqwest chased the redirect
    // itself, or the loop re-appended the namespace, this test would
    // observe it.
    async fn redirecting(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        assert_eq!(params.get("namespace").map(String::as_str), Some("dev"));
        (
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, "/alt/functions")],
        )
    }

    async fn alternate(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        let ns = params
            .get("namespace")
            .cloned()
            .unwrap_or_else(|| "absent".to_string());
        Json(json!([{"name": "gamma", "seen_namespace": ns}]))
    }

    let app = Router::new()
        .route("/system/functions", get(redirecting))
        .route("/alt/functions", get(alternate));
    let addr = start_stub(app).await;
    let client = client_for(addr);
    let cancel = CancellationToken::new();

    let functions = client
        .list_functions(&cancel, Some("dev"))
        .await
        .expect("list via redirect");

    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "gamma");
    assert_eq!(
        functions[0].field_text("seen_namespace").as_deref(),
        Some("absent"),
        "redirect location must be used verbatim"
    );
}

#[tokio::test]
async fn unauthorized_maps_to_auth_required() {
    async fn unauthorized() -> impl IntoResponse {
        StatusCode::UNAUTHORIZED
    }

    let addr = start_stub(Router::new().route("/system/functions", get(unauthorized))).await;
    let client = client_for(addr);
    let cancel = CancellationToken::new();

    let err = client.list_functions(&cancel, None).await.unwrap_err();

    assert!(matches!(err, GatewayError::AuthRequired { .. }));
}

#[tokio::test]
async fn connection_refused_maps_to_connection_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe local addr");
    drop(listener);

    let client = client_for(addr);
    let cancel = CancellationToken::new();

    let err = client.list_functions(&cancel, None).await.unwrap_err();

    match err {
        GatewayError::Connection { gateway, .. } => {
            assert!(gateway.contains("127.0.0.1"));
        }
        other => panic!("expected Connection, got {other:?}"),
    }
}

#[tokio::test]
async fn bearer_auth_reaches_the_gateway() {
    async fn check_auth(headers: axum::http::HeaderMap) -> impl IntoResponse {
        match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some("Bearer sekrit") => Json(json!([{"name": "authed"}])).into_response(),
            _ => StatusCode::UNAUTHORIZED.into_response(),
        }
    }

    let addr = start_stub(Router::new().route("/system/functions", get(check_auth))).await;
    let gateway = Url::parse(&format!("http://{addr}")).expect("gateway url");
    let client = Client::new(
        gateway,
        &Auth::Token("sekrit".to_string()),
        Duration::from_secs(5),
    )
    .expect("build client");
    let cancel = CancellationToken::new();

    let functions = client.list_functions(&cancel, None).await.expect("list");
    assert_eq!(functions[0].name, "authed");
}
