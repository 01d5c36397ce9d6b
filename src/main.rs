//! NSPanel Lovelace UI configuration inspector
//!
//! Loads a panel configuration, merges it over the built-in defaults and
//! answers queries against the resolved model.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use lui_config::cli::{Cli, Command};
use lui_config::config::ConfigLoader;
use lui_config::host::ContextRenderer;
use lui_config::logging::{self, LogTarget};
use lui_config::model::{Card, PanelConfig};
use serde_json::json;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut loader = match &cli.config {
        Some(path) => ConfigLoader::from_path(path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        None => ConfigLoader::discover().context("failed to discover configuration")?,
    };
    if let Some(section) = &cli.section {
        loader = loader.section(section)?;
    }
    debug!(sources = ?loader.sources(), "configuration sources");
    let panel = loader.into_panel().context("failed to build panel model")?;

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => show(&panel),
        Command::Get { path } => {
            let value = panel
                .get(&path)
                .ok_or_else(|| anyhow!("no value at '{path}'"))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Command::Search { target } => {
            let card = find(&panel, &target)?;
            println!("{}", serde_json::to_string_pretty(card)?);
        }
        Command::Entities => {
            for entity_ref in panel.entity_refs() {
                println!("{entity_ref}");
            }
        }
        Command::DefaultCard { vars } => {
            let renderer = vars
                .into_iter()
                .fold(ContextRenderer::new(), |r, (name, value)| r.with_var(name, value));
            let card = panel
                .default_card(&renderer)
                .ok_or_else(|| anyhow!("configuration has no cards"))?;
            println!("{}", describe(card));
        }
        Command::Next { target } => {
            let card = find(&panel, &target)?;
            match panel.next_card(card) {
                Some(next) => println!("{}", describe(next)),
                None => println!("{} is not part of navigation", card.slug),
            }
        }
        Command::Prev { target } => {
            let card = find(&panel, &target)?;
            match panel.prev_card(card) {
                Some(prev) => println!("{}", describe(prev)),
                None => println!("{} is not part of navigation", card.slug),
            }
        }
    }

    Ok(())
}

fn find<'a>(panel: &'a PanelConfig, target: &str) -> Result<&'a Card> {
    panel
        .search(target)
        .ok_or_else(|| anyhow!("no card matches '{target}'"))
}

fn describe(card: &Card) -> String {
    format!("{} [{}] {} ({})", card.slug, card.card_type, card.title, card.id)
}

fn show(panel: &PanelConfig) {
    println!("Cards:");
    for card in panel.visible_cards() {
        let marker = if card.is_navigable() { "↻" } else { "·" };
        println!(
            "  {marker} {}  entities={}",
            describe(card),
            card.entities().len()
        );
    }
    let hidden: Vec<&Card> = panel.hidden_cards().collect();
    if !hidden.is_empty() {
        println!("Hidden:");
        for card in hidden {
            println!("  - {}  entities={}", describe(card), card.entities().len());
        }
    }
    println!("Screensaver:");
    println!("  {}", describe(panel.screensaver()));

    let summary = json!({
        "model": panel.get("model"),
        "locale": panel.get("locale"),
        "panelRecvTopic": panel.get("panelRecvTopic"),
        "panelSendTopic": panel.get("panelSendTopic"),
        "entityRefs": panel.entity_refs().len(),
    });
    if let Ok(text) = serde_json::to_string_pretty(&summary) {
        println!("{text}");
    }
}
