//! Go Marketplace CLI - Inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show cart contents and totals
//! gm-cart list
//!
//! # Add a product (or one more unit of it)
//! gm-cart add --id p1 --title "Shirt" --image-url https://cdn/p1.png --price 19.99
//!
//! # Adjust quantities
//! gm-cart increment p1
//! gm-cart decrement p1
//!
//! # Use a different data directory
//! gm-cart --storage-dir /tmp/cart list
//! ```
//!
//! # Commands
//!
//! - `list` - Show cart lines and summary
//! - `add` - Add one unit of a product
//! - `increment` / `decrement` - Adjust a line's quantity
//! - `remove` - Drop a line
//! - `clear` - Empty the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use go_marketplace_cart::{CartConfig, CartProvider, CartStore};
use go_marketplace_core::{CatalogProduct, Price, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    /// Directory holding the cart snapshot (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Storage key of the cart snapshot (overrides `CART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart lines and totals
    List,
    /// Add one unit of a product
    Add {
        /// Catalog product ID
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(long)]
        price: Price,
    },
    /// Add one unit to an existing line
    Increment {
        /// Product ID of the line
        id: String,
    },
    /// Remove one unit from a line, dropping it at zero
    Decrement {
        /// Product ID of the line
        id: String,
    },
    /// Drop a line regardless of quantity
    Remove {
        /// Product ID of the line
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_cart=info,gm_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }

    tracing::debug!(?config, "Opening cart");
    let store = CartStore::open(Arc::new(config.file_store()), config.storage_key.clone()).await;
    let provider = CartProvider::new(store);
    let cart = provider.handle();

    let result = match cli.command {
        Commands::List => commands::cart::list(&cart),
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            let product = CatalogProduct {
                id: ProductId::new(id),
                title,
                image_url,
                price,
            };
            commands::cart::add(&cart, product).await
        }
        Commands::Increment { id } => commands::cart::increment(&cart, &ProductId::new(id)).await,
        Commands::Decrement { id } => commands::cart::decrement(&cart, &ProductId::new(id)).await,
        Commands::Remove { id } => commands::cart::remove(&cart, &ProductId::new(id)).await,
        Commands::Clear => commands::cart::clear(&cart).await,
    };

    provider.shutdown().await;
    result
}
