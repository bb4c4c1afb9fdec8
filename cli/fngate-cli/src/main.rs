// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! fngate CLI - command-line interface for the fngate functions gateway

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fngate_client::{Auth, Client};
use tokio_util::sync::CancellationToken;
use url::Url;

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "fngate",
    version,
    about = "fngate functions gateway CLI",
    long_about = "Command-line interface for inspecting workloads deployed on an fngate gateway"
)]
struct Cli {
    /// Gateway base URL
    #[arg(
        short = 'g',
        long,
        global = true,
        env = "FNGATE_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    gateway: String,

    /// Bearer token for gateway authentication
    #[arg(long, global = true, env = "FNGATE_TOKEN")]
    token: Option<String>,

    /// Basic credentials as user:password
    #[arg(long, global = true, env = "FNGATE_BASIC_AUTH", conflicts_with = "token")]
    basic_auth: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 60)]
    timeout: u64,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List deployed functions
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

impl Cli {
    /// Build a gateway client from CLI options or environment
    fn build_client(&self) -> Result<Client> {
        let gateway = Url::parse(&self.gateway)
            .with_context(|| format!("invalid gateway URL: {}", self.gateway))?;

        let auth = if let Some(token) = &self.token {
            Auth::Token(token.clone())
        } else if let Some(basic) = &self.basic_auth {
            let Some((username, password)) = basic.split_once(':') else {
                bail!("--basic-auth must be in user:password form");
            };
            Auth::Basic {
                username: username.to_string(),
                password: password.to_string(),
            }
        } else {
            Auth::None
        };

        Client::new(gateway, &auth, Duration::from_secs(self.timeout))
            .context("failed to build gateway client")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("fngate=debug,fngate_client=debug")
            .init();
    }

    // One token for the whole invocation; Ctrl-C cancels in-flight work.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    match &cli.command {
        Commands::List(args) => {
            let client = cli.build_client()?;
            commands::list::run(&client, &cancel, args, cli.json).await
        }
    }
}
