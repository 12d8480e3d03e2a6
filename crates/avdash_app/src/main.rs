mod config;
mod logging;
mod render;

use std::sync::Arc;

use avdash_client::{
    run_chain, spawn_poller, sweep_completed, ClientSettings, Controller, HttpController,
    PollValue,
};
use avdash_core::{analyze, keyword_match_counts, overview, up_next};
use chrono::Local;
use dash_logging::{dash_info, dash_warn};
use tokio_util::sync::CancellationToken;

use config::AppConfig;
use logging::LogDestination;

const USAGE: &str = "usage: avdash [watch|health|maintain|reset-errors] [BASE_URL]";

#[tokio::main]
async fn main() {
    logging::initialize(LogDestination::Both);

    let mut args = std::env::args().skip(1);
    // A bare URL argument selects the default mode.
    let (mode, url_arg) = match args.next() {
        Some(first) if first.starts_with("http://") || first.starts_with("https://") => {
            ("watch".to_string(), Some(first))
        }
        Some(first) => (first, args.next()),
        None => ("watch".to_string(), None),
    };
    let config = AppConfig::from_env(url_arg);

    let result = match mode.as_str() {
        "watch" => watch(&config).await,
        "health" => health(&config).await,
        "maintain" => maintain(&config).await,
        "reset-errors" => reset_errors(&config).await,
        "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(format!("unknown mode '{other}'\n{USAGE}")),
    };

    if let Err(message) = result {
        eprintln!("avdash: {message}");
        std::process::exit(1);
    }
}

fn controller_for(config: &AppConfig) -> Result<Arc<HttpController>, String> {
    HttpController::new(ClientSettings {
        base_url: config.base_url.clone(),
        ..ClientSettings::default()
    })
    .map(Arc::new)
    .map_err(|err| err.to_string())
}

/// Default mode: poll the pipeline and priority list, render on every update
/// until Ctrl-C.
async fn watch(config: &AppConfig) -> Result<(), String> {
    let controller = controller_for(config)?;
    dash_info!("watching {}", config.base_url);

    // One-shot clear-completed sweep on control-view load; a failed sweep is
    // logged, never fatal.
    if let Err(err) = sweep_completed(controller.as_ref()).await {
        dash_warn!("priority sweep skipped: {err}");
    }

    let cancel = CancellationToken::new();
    let pipeline = {
        let controller = controller.clone();
        spawn_poller(
            "pipeline",
            config.pipeline_interval,
            cancel.child_token(),
            move || {
                let controller = controller.clone();
                async move { controller.pipeline_snapshot().await }
            },
        )
    };
    let priority = {
        let controller = controller.clone();
        spawn_poller(
            "priority",
            config.priority_interval,
            cancel.child_token(),
            move || {
                let controller = controller.clone();
                async move { controller.priority_list().await }
            },
        )
    };

    let mut snapshot_rx = pipeline.subscribe();
    let priority_rx = priority.subscribe();
    let limit = config.up_next_limit;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = snapshot_rx.borrow_and_update().clone();
                match value {
                    PollValue::Pending => {}
                    PollValue::Unavailable(message) => {
                        println!("controller unavailable: {message}");
                    }
                    PollValue::Ready(snapshot) => {
                        let priority_paths = priority_rx
                            .borrow()
                            .ready()
                            .cloned()
                            .unwrap_or_default();
                        let now = Local::now().naive_local();
                        print!("{}", render::render_overview(&overview(&snapshot, now)));
                        print!("{}", render::render_up_next(&up_next(&snapshot, &priority_paths, limit)));
                        println!();
                    }
                }
            }
        }
    }

    cancel.cancel();
    pipeline.join().await;
    priority.join().await;
    Ok(())
}

/// Prints the filename health report for the current library snapshot.
async fn health(config: &AppConfig) -> Result<(), String> {
    let controller = controller_for(config)?;
    let library = controller
        .library_snapshot()
        .await
        .map_err(|err| err.to_string())?;
    let keywords = controller
        .custom_keywords()
        .await
        .unwrap_or_else(|err| {
            dash_warn!("custom keywords unavailable: {err}");
            Vec::new()
        });

    let report = analyze(&library, &keywords);
    let counts = keyword_match_counts(&library, &keywords);
    print!("{}", render::render_health(&report, &counts));
    Ok(())
}

/// Runs the strip-tags-then-rescan chain and reports on the refreshed library.
async fn maintain(config: &AppConfig) -> Result<(), String> {
    let controller = controller_for(config)?;
    let cancel = CancellationToken::new();

    let chain = run_chain(controller.as_ref(), config.action_interval, &cancel);
    tokio::pin!(chain);

    let library = tokio::select! {
        result = &mut chain => result.map_err(|err| err.to_string())?,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            return Err("maintenance chain cancelled".to_string());
        }
    };

    println!("maintenance chain finished; {} files in library", library.files.len());
    let report = analyze(&library, &[]);
    print!("{}", render::render_health(&report, &[]));
    Ok(())
}

/// Resets errored pipeline items back to pending.
async fn reset_errors(config: &AppConfig) -> Result<(), String> {
    let controller = controller_for(config)?;
    let reset = controller
        .reset_errors()
        .await
        .map_err(|err| err.to_string())?;
    println!("reset {reset} errored items to pending");
    Ok(())
}
