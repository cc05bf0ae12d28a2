// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0
use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::path::Path;
use tracing_appender;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{self, EnvFilter, fmt};

use rds_mcp::client::{AwsClientManager, StaticCredentials};
use rds_mcp::server::RdsOperator;

#[derive(Parser, Debug)]
#[command(name = "rds-mcp")]
#[command(about = "Read-only Amazon RDS inspection tools over MCP")]
#[command(version)]
struct Args {
    /// Default AWS region for tool calls that do not override it
    #[arg(long, default_value = "us-east-1")]
    region: String,

    /// AWS access key (optional when using IAM roles or the environment)
    #[arg(long)]
    access_key: Option<String>,

    /// AWS secret access key; must be paired with --access-key
    #[arg(long)]
    secret_access_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let credentials = match (args.access_key, args.secret_access_key) {
        (Some(access_key), Some(secret_access_key)) => Some(StaticCredentials {
            access_key,
            secret_access_key,
        }),
        (None, None) => None,
        _ => anyhow::bail!(
            "--access-key and --secret-access-key must be provided together, or neither for IAM role usage"
        ),
    };

    // Create log file in /tmp
    let log_path = "/tmp/rds_mcp.log";

    // Setup file logging
    let file_appender = tracing_appender::rolling::never(Path::new("/tmp"), "rds_mcp.log");

    // Initialize the tracing subscriber with both file and stderr logging
    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr.and(file_appender))
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting RDS MCP server... Logs will be saved to {}", log_path);

    let clients = AwsClientManager::new(&args.region, credentials).await;
    let service = RdsOperator::new(clients)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("Error: {}", e);
        })?;

    service.waiting().await?;

    Ok(())
}
