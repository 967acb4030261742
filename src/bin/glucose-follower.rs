// ABOUTME: Glucose follower binary polling the LibreLinkUp cloud for new readings
// ABOUTME: Runs one cycle with --once, otherwise schedules cycles until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Glucose Follower Binary
//!
//! Reads its configuration from the environment (`LLU_*` variables) and
//! prints each new reading to stdout.

use anyhow::Result;
use clap::Parser;
use glucose_follower::{
    config::FollowerConfig,
    logging,
    models::Reading,
    providers::{initialize_shared_client, LibreLinkUpFollower, ReqwestTransport},
    scheduler::{poll_once, FollowerScheduler},
};
use std::future;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const READING_CHANNEL_CAPACITY: usize = 16;

/// Command line arguments
#[derive(Parser)]
#[command(name = "glucose-follower")]
#[command(about = "Follow CGM readings shared through LibreLinkUp")]
pub struct Args {
    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Print readings as JSON lines
    #[arg(long)]
    json: bool,
}

fn print_reading(reading: &Reading, as_json: bool) {
    if as_json {
        match serde_json::to_string(reading) {
            Ok(line) => println!("{line}"),
            Err(e) => error!(error = %e, "Failed to serialize reading"),
        }
    } else {
        println!("{reading}");
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Cannot listen for Ctrl-C, running until killed");
        future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;
    let config = FollowerConfig::from_env()?;
    info!("{}", config.summary());

    initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );
    let mut follower =
        LibreLinkUpFollower::new(config.librelinkup, Arc::new(ReqwestTransport::shared()));

    if args.once {
        let Some(outcome) = poll_once(&mut follower).await else {
            warn!("Follower is disabled; set LLU_ENABLED=true to poll");
            return Ok(());
        };
        match outcome.reading() {
            Some(reading) => print_reading(reading, args.json),
            None => println!("{outcome}"),
        }
        return Ok(());
    }

    let (tx, mut rx) = mpsc::channel(READING_CHANNEL_CAPACITY);
    let as_json = args.json;
    let printer = tokio::spawn(async move {
        while let Some(reading) = rx.recv().await {
            print_reading(&reading, as_json);
        }
    });

    let scheduler = FollowerScheduler::new(follower, tx);
    let follower = scheduler.run_until(shutdown_signal()).await;
    drop(follower);
    printer.await?;

    info!("Glucose follower stopped");
    Ok(())
}
