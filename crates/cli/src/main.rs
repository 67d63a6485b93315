//! Blanja CLI - browse products and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalogue
//! blanja products --search jacket --page 2
//!
//! # List by condition
//! blanja products --condition new
//!
//! # Show one product
//! blanja product 42
//!
//! # Show the cart, then quote a selection
//! blanja cart show
//! blanja cart select 10 20
//!
//! # Change a quantity, delete, check out
//! blanja cart quantity 10 -1
//! blanja cart delete-selected 10
//! blanja cart checkout --all
//!
//! # Store or forget the bearer token
//! blanja token set <TOKEN>
//! blanja token clear
//! ```
//!
//! Configuration comes from the environment; see
//! [`blanja_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "blanja")]
#[command(author, version, about = "Blanja storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products (10 per page)
    Products(ProductsArgs),
    /// Show a single product
    Product {
        /// Product ID
        id: u32,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the stored bearer token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Args)]
struct ProductsArgs {
    /// Free-text search
    #[arg(short, long)]
    search: Option<String>,
    /// Color filter
    #[arg(long)]
    colors: Option<String>,
    /// Size filter
    #[arg(long)]
    sizes: Option<String>,
    /// Category filter
    #[arg(long)]
    category: Option<String>,
    /// Seller filter
    #[arg(long)]
    seller: Option<String>,
    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    page: u32,
    /// List by condition instead (ignores the other filters)
    #[arg(long, conflicts_with_all = ["search", "colors", "sizes", "category", "seller"])]
    condition: Option<String>,
    /// Render the listing as an HTML product section
    #[arg(long)]
    html: bool,
}

/// Products to act on: explicit IDs or everything in the cart.
#[derive(Args)]
struct Selection {
    /// Product IDs to select
    products: Vec<u32>,
    /// Select every item in the cart
    #[arg(long, conflicts_with = "products")]
    all: bool,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and the shipping address
    Show,
    /// Quote the checkout for a selection without submitting it
    Select {
        #[command(flatten)]
        selection: Selection,
        /// Render the shopping summary as HTML
        #[arg(long)]
        html: bool,
    },
    /// Change a product's quantity by a signed delta
    Quantity {
        /// Product ID
        product: u32,
        /// Signed change, e.g. 1 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Delete the selected products from their carts
    DeleteSelected {
        #[command(flatten)]
        selection: Selection,
    },
    /// Check out the selected products
    Checkout {
        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store a bearer token for later commands
    Set {
        /// The token issued by the backend at login
        token: String,
    },
    /// Forget the stored token
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blanja_storefront=info,blanja_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> blanja_storefront::Result<()> {
    let config = blanja_storefront::config::StorefrontConfig::from_env()?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products(args) => {
            commands::products::list(&config, &args.into(), &mut out).await?;
        }
        Commands::Product { id } => {
            commands::products::show(&config, id.into(), &mut out).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config, &mut out).await?,
            CartAction::Select { selection, html } => {
                commands::cart::quote(&config, &selection.into(), html, &mut out).await?;
            }
            CartAction::Quantity { product, delta } => {
                commands::cart::change_quantity(&config, product.into(), delta, &mut out).await?;
            }
            CartAction::DeleteSelected { selection } => {
                commands::cart::delete_selected(&config, &selection.into(), &mut out).await?;
            }
            CartAction::Checkout { selection } => {
                commands::cart::checkout(&config, &selection.into(), &mut out).await?;
            }
        },
        Commands::Token { action } => match action {
            TokenAction::Set { token } => commands::token::set(&config, token, &mut out)?,
            TokenAction::Clear => commands::token::clear(&config, &mut out)?,
        },
    }
    Ok(())
}

impl From<ProductsArgs> for commands::products::ListRequest {
    fn from(args: ProductsArgs) -> Self {
        Self {
            filter: blanja_storefront::api::ProductFilter {
                keyword: args.search,
                colors: args.colors,
                sizes: args.sizes,
                category: args.category,
                seller: args.seller,
                page: args.page,
            },
            condition: args.condition,
            html: args.html,
        }
    }
}

impl From<Selection> for commands::cart::Pick {
    fn from(selection: Selection) -> Self {
        if selection.all {
            Self::All
        } else {
            Self::Products(selection.products.into_iter().map(Into::into).collect())
        }
    }
}
