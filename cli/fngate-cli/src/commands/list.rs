// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! List command

use anyhow::Result;
use clap::Args;
use fngate_client::{Client, FunctionStatus};
use tokio_util::sync::CancellationToken;

use crate::output;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Namespace to scope the listing to
    #[arg(short, long, env = "FNGATE_NAMESPACE")]
    namespace: Option<String>,
}

/// List deployed functions
pub async fn run(
    client: &Client,
    cancel: &CancellationToken,
    args: &ListArgs,
    use_json: bool,
) -> Result<()> {
    let functions = client
        .list_functions(cancel, args.namespace.as_deref())
        .await?;

    if use_json {
        output::print_json(&functions)?;
    } else {
        let mut tbl = output::create_table(&["NAME", "IMAGE", "REPLICAS", "INVOCATIONS"]);
        for function in &functions {
            tbl.add_row(vec![
                function.name.clone(),
                field_or_dash(function, "image"),
                field_or_dash(function, "replicas"),
                field_or_dash(function, "invocationCount"),
            ]);
        }
        output::print_table(tbl);
    }

    Ok(())
}

fn field_or_dash(function: &FunctionStatus, key: &str) -> String {
    function
        .field_text(key)
        .unwrap_or_else(|| "-".to_string())
}
