//! touchdeck CLI: offline tools around the input manager's configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use touchdeck_core::{Config, Shortcut};
use touchdeck_touchmap::{ControlKind, Touchmap};
use touchdeck_types::KeyCode;
use tracing_subscriber::fmt::Formatter;
use tracing_subscriber::{reload, EnvFilter};

#[derive(Parser)]
#[command(
    name = "touchdeck",
    about = "Input tools for remote Android control",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a touchmap file and print its controls.
    Check {
        /// Touchmap JSON document.
        file: PathBuf,
    },

    /// Print the keyboard shortcuts.
    Shortcuts,

    /// Print the default configuration.
    DefaultConfig,
}

type FilterHandle = reload::Handle<EnvFilter, Formatter>;

/// A subscriber starting at `filter`, and the handle that replaces the filter
/// once the config is loaded.
fn logging(filter: EnvFilter) -> (impl tracing::Subscriber + Send + Sync, FilterHandle) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_filter_reloading();
    let handle = builder.reload_handle();
    (builder.finish(), handle)
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG wins; otherwise start at "info" until the config names a level
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let (subscriber, filter) = logging(from_env.unwrap_or_else(|| EnvFilter::new("info")));
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    if !env_set {
        filter.reload(EnvFilter::new(&config.log.level))?;
    }

    match cli.command {
        Commands::Check { file } => check(&file)?,
        Commands::Shortcuts => print_shortcuts(&config),
        Commands::DefaultConfig => print!("{}", Config::default().to_toml()?),
    }

    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    tracing::info!(path = %path.display(), "checking touchmap");
    let map = Touchmap::from_path(path)
        .with_context(|| format!("invalid touchmap {}", path.display()))?;

    match map.walk() {
        Some(walk) => println!(
            "walk     center=({}, {}) radius={} finger={}",
            walk.center.x, walk.center.y, walk.radius, walk.finger
        ),
        None => println!("walk     none"),
    }
    for control in map.controls() {
        let kind = match control.kind {
            ControlKind::Button => "button".to_string(),
            ControlKind::Skill { radius } => format!("skill radius={radius}"),
        };
        println!(
            "code {:>3}  {kind:<18} center=({}, {}) finger={}",
            control.code.to_string(),
            control.center.x,
            control.center.y,
            control.finger
        );
    }
    println!("{} control(s)", map.controls().len());
    Ok(())
}

/// `KeyH` -> `H`, `ArrowUp` -> `Up`.
fn key_label(key: KeyCode) -> String {
    let name = format!("{key:?}");
    name.strip_prefix("Key")
        .or_else(|| name.strip_prefix("Arrow"))
        .unwrap_or(&name)
        .to_string()
}

fn print_shortcuts(config: &Config) {
    let mods: Vec<String> = config
        .input
        .shortcut_mods
        .iter()
        .map(|m| format!("{m:?}"))
        .collect();
    println!("MOD is any of: {}", mods.join(", "));
    println!();
    for (key, shift, shortcut) in Shortcut::table() {
        let combo = if shift {
            format!("MOD+Shift+{}", key_label(key))
        } else {
            format!("MOD+{}", key_label(key))
        };
        println!("{combo:<20} {}", shortcut.action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_labels_are_short() {
        assert_eq!(key_label(KeyCode::KeyH), "H");
        assert_eq!(key_label(KeyCode::ArrowLeft), "Left");
        assert_eq!(key_label(KeyCode::Backspace), "Backspace");
    }

    #[test]
    fn config_level_replaces_startup_filter() {
        let (subscriber, filter) = logging(EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
            filter.reload(EnvFilter::new("debug")).unwrap();
            assert!(tracing::enabled!(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn cli_parses_global_config() {
        let cli = Cli::try_parse_from(["touchdeck", "check", "map.json", "--config", "a.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert!(matches!(cli.command, Commands::Check { file } if file == Path::new("map.json")));
    }
}
