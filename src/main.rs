//! storyview - replay scripted preview sessions through the render coordinator.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use storyview::replay::{replay, Script};
use storyview::PreviewConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("storyview")
        .version(storyview::VERSION)
        .about("Replay a scripted preview session through the render coordinator")
        .long_about(
            "storyview drives the story preview render coordinator with a TOML script of \
             stories and steps, printing every notification it emits and the final state of \
             the preview surface.",
        )
        .arg(
            Arg::new("script")
                .help("Path to the replay script")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (defaults to <config dir>/storyview/config.toml)"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .action(ArgAction::SetTrue)
                .help("Run without a notification channel"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print notifications as JSON lines"),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => PreviewConfig::load(&PathBuf::from(path))?,
        None => PreviewConfig::discover()?,
    };
    if matches.get_flag("headless") {
        config.headless = true;
    }

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter = config.log_filter.clone().unwrap_or_else(|| "warn".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let script_path = PathBuf::from(
        matches
            .get_one::<String>("script")
            .context("script argument is required")?,
    );
    let script = Script::load(&script_path)?;
    let report = replay(&script, &config).await?;

    let json = matches.get_flag("json");
    for notification in &report.notifications {
        if json {
            println!("{}", serde_json::to_string(notification)?);
        } else {
            println!("{notification:?}");
        }
    }

    let view = &report.view;
    println!(
        "state: {}",
        view.active_class()
            .map_or("none", |class| class.class_name())
    );
    if let Some(metadata) = &report.last_rendered {
        println!(
            "last rendered: {} ({} mode, revision {})",
            metadata.id.as_deref().unwrap_or("<unresolved>"),
            metadata.view_mode,
            metadata.revision
        );
    }
    println!(
        "style writes: {}, scroll resets: {}",
        view.style_writes, view.scroll_resets
    );

    Ok(())
}
