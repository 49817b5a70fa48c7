//! `lectern serve`: build the enabled demo states and run the HTTP server.

use anyhow::Result;
use console::style;

use lectern_types::config::LecternConfig;

use crate::cli::DemoSelection;
use crate::http::router::{FORECAST_PATH, build_router};
use crate::state::{ChatState, ForecastState};

pub async fn serve(config: &LecternConfig, demo: DemoSelection, host: &str, port: u16) -> Result<()> {
    let forecast = demo
        .includes_forecast()
        .then(|| ForecastState::seeded(&config.forecast));

    let chat = if demo.includes_chat() {
        Some(ChatState::from_settings(&config.ai)?)
    } else {
        None
    };

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, ?demo, "listening");

    println!(
        "  {} Lectern listening on {}",
        style("⚡").bold(),
        style(format!("http://{addr}")).cyan()
    );
    if forecast.is_some() {
        println!("  {}  {FORECAST_PATH}", style("forecast").dim());
    }
    if chat.is_some() {
        println!("  {}      /chat?demo=1|2", style("chat").dim());
    }
    println!("  {}", style("Press Ctrl+C to stop").dim());

    let router = build_router(forecast, chat);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
