//! # Lumière Cart CLI
//!
//! Drives one [`CartStore`](lumiere_cart::CartStore) from the command line.
//! Every invocation opens the store, runs a single operation, prints the
//! resulting cart and exits. The persisted record carries state between
//! invocations.
//!
//! ## Module Organization
//! ```text
//! lumiere_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & run)
//! └── commands.rs     ◄─── One function per cart operation
//! ```
//!
//! ## Usage
//! ```bash
//! lumiere-cart add --id 1 --name "Rose Lip Oil" --price 24.00 --image /img/rose.jpg
//! lumiere-cart update --id 1 --quantity 3
//! lumiere-cart show
//! lumiere-cart --config ./cart.toml clear
//! RUST_LOG=lumiere=trace lumiere-cart evict
//! ```

pub mod commands;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lumiere_cart::CartConfig;
use lumiere_core::{CartItem, CartSnapshot, Money};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lumiere-cart")]
#[command(author, version, about = "Lumière storefront cart store")]
pub struct Cli {
    /// Path to a cart.toml (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the current cart
    Show,
    /// Add a product, merging with an existing line of the same id
    Add {
        /// Product id
        #[arg(long)]
        id: i64,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price as a decimal amount, e.g. 24.00
        #[arg(long)]
        price: Money,

        /// Image URI
        #[arg(long)]
        image: String,

        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line entirely
    Remove {
        #[arg(long)]
        id: i64,
    },
    /// Set a line's quantity (zero or less removes it)
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Delete the persisted cart record
    Evict,
}

/// Parses arguments, opens the configured store and runs one command.
pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_tracing();

    let config = CartConfig::load(cli.config)?;
    info!(
        backend = %config.storage.backend,
        key = %config.storage.key,
        "Opening cart store"
    );

    let store = config.open_store()?;
    debug!(command = ?cli.command, "Running command");

    let snapshot = commands::execute(store, cli.command)?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!("{}", summary(&snapshot));

    Ok(())
}

/// One-line cart summary, e.g. `3 items, subtotal $61.50`.
pub fn summary(snapshot: &CartSnapshot) -> String {
    let subtotal: Money = snapshot.items.iter().map(CartItem::line_total).sum();
    let noun = if snapshot.item_count == 1 { "item" } else { "items" };
    format!("{} {}, subtotal {}", snapshot.item_count, noun, subtotal)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays parseable JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lumiere=trace` - Show trace for lumiere crates only
/// - Default: `info,lumiere=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lumiere=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_core::{NewCartItem, ProductId};

    #[test]
    fn test_parse_add_defaults_quantity() {
        let cli = Cli::try_parse_from([
            "lumiere-cart",
            "add",
            "--id",
            "1",
            "--name",
            "Rose Lip Oil",
            "--price",
            "24.00",
            "--image",
            "/img/rose.jpg",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Add {
                id: 1,
                name: "Rose Lip Oil".to_string(),
                price: Money::from_cents(2400),
                image: "/img/rose.jpg".to_string(),
                quantity: 1,
            }
        );
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_price() {
        let result = Cli::try_parse_from([
            "lumiere-cart",
            "add",
            "--id",
            "1",
            "--name",
            "Rose Lip Oil",
            "--price",
            "twelve",
            "--image",
            "/img/rose.jpg",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update_accepts_negative_quantity() {
        let cli =
            Cli::try_parse_from(["lumiere-cart", "update", "--id", "4", "--quantity", "-2"]).unwrap();
        assert_eq!(cli.command, Command::Update { id: 4, quantity: -2 });
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["lumiere-cart", "show", "--config", "/etc/cart.toml"]).unwrap();
        assert_eq!(cli.command, Command::Show);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/cart.toml")));
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&CartSnapshot::default()), "0 items, subtotal $0.00");

        let mut cart = lumiere_core::Cart::new();
        cart.add_item(
            NewCartItem::new(ProductId::new(1), "Serum", Money::from_cents(1250), "/s.jpg"),
            1,
        )
        .unwrap();
        assert_eq!(summary(&cart.snapshot()), "1 item, subtotal $12.50");

        cart.add_item(
            NewCartItem::new(ProductId::new(2), "Balm", Money::from_cents(900), "/b.jpg"),
            4,
        )
        .unwrap();
        assert_eq!(summary(&cart.snapshot()), "5 items, subtotal $48.50");
    }
}
