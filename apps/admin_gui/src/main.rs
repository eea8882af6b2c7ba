use std::{sync::Arc, time::Duration};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, ApiClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::{events::UiEvent, EmployeeViewController};
use crate::ui::AdminApp;

#[derive(Parser, Debug)]
#[command(name = "admin_gui", about = "Employee administration desktop app")]
struct Args {
    /// Backend base URL; overrides admin.toml and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Default tracing filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = client_core::config::normalize_api_url(&api_url);
    }
    tracing::info!(api_url = %settings.api_url, "starting admin gui");

    let client = ApiClient::from_settings(&settings)?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let mut controller = EmployeeViewController::with_options(
        cmd_tx,
        settings.page_size,
        Duration::from_millis(settings.toast_ms),
    );
    controller.refresh();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Admin")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Employee Admin",
        options,
        Box::new(move |_cc| Ok(Box::new(AdminApp::new(controller, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("desktop window exited with an error")
}
