#![allow(non_snake_case)]

mod cli;
mod clients;
mod config;
mod error;
mod models;
mod runtime;
mod service;

use std::env;

use crate::config::AppConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    cli::cli(config).await;
}
