//! Cart commands.
//!
//! Every command loads the cart fresh, applies the requested selection, and
//! then runs one page operation against it.

use std::io::Write;

use askama::Template;
use blanja_core::{LoadStatus, ProductId};
use blanja_storefront::api::BlanjaClient;
use blanja_storefront::cart::{CartPage, DeleteOutcome, QuantityChange};
use blanja_storefront::components::ShoppingSummary;
use blanja_storefront::config::StorefrontConfig;
use blanja_storefront::navigation::{HistoryNavigator, Location, Navigator};
use blanja_storefront::notify::Notifier;
use blanja_storefront::{AppError, Result};
use tracing::warn;

type TerminalCartPage = CartPage<BlanjaClient, HistoryNavigator, TerminalNotifier>;

/// Which cart items a command acts on.
pub enum Pick {
    All,
    Products(Vec<ProductId>),
}

/// Alerts go straight to stderr, outside the log stream.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    #[allow(clippy::print_stderr)]
    fn alert(&self, message: &str) {
        eprintln!("!! {message}");
    }
}

async fn open(config: &StorefrontConfig) -> Result<TerminalCartPage> {
    let client = BlanjaClient::new(config, config.credentials())?;
    let mut page = CartPage::new(
        client,
        HistoryNavigator::new(Location::new("/cart")),
        TerminalNotifier,
    )
    .with_delivery_fee(config.delivery_fee)
    .with_mutation_errors(config.mutation_errors);

    if page.load().await == LoadStatus::Error {
        return Err(AppError::CartUnavailable);
    }
    Ok(page)
}

fn apply(page: &mut TerminalCartPage, pick: &Pick) {
    match pick {
        Pick::All => page.select_all(true),
        Pick::Products(ids) => {
            for &id in ids {
                if page.state().find(id).is_none() {
                    warn!(product_id = %id, "Product is not in the cart");
                }
                page.select(id, true);
            }
        }
    }
}

/// Print cart contents and the shipping address.
pub async fn show(config: &StorefrontConfig, out: &mut impl Write) -> Result<()> {
    let page = open(config).await?;
    let state = page.state();

    if state.items.is_empty() {
        writeln!(out, "Your cart is empty.")?;
    }
    for item in &state.items {
        writeln!(
            out,
            "cart {:>4}  product {:>6}  {:<32}  {:>3} x {:>14} = {:>14}",
            item.cart_id.as_u32(),
            item.product_id.as_u32(),
            item.name,
            item.quantity,
            item.price.display(),
            item.line_total()?.display(),
        )?;
    }

    if let Some(address) = state.shipping_address() {
        writeln!(out)?;
        writeln!(out, "Ship to: {} ({})", address.name, address.phone)?;
        writeln!(
            out,
            "         {}, {}, {} {}",
            address.main_address, address.detail_address, address.city, address.postal_code
        )?;
    }
    Ok(())
}

/// Print what checking out the selection would cost.
pub async fn quote(
    config: &StorefrontConfig,
    pick: &Pick,
    html: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut page = open(config).await?;
    apply(&mut page, pick);
    let quote = page.quote()?;

    if html {
        writeln!(out, "{}", ShoppingSummary::new(quote.total).render()?)?;
        return Ok(());
    }

    writeln!(out, "Selected: {}", page.state().selected_count())?;
    writeln!(out, "Total:    {}", quote.total)?;
    writeln!(out, "Delivery: {}", quote.delivery)?;
    writeln!(out, "Summary:  {}", quote.summary)?;
    Ok(())
}

/// Change one product's quantity.
pub async fn change_quantity(
    config: &StorefrontConfig,
    product_id: ProductId,
    delta: i32,
    out: &mut impl Write,
) -> Result<()> {
    let mut page = open(config).await?;

    match page.change_quantity(product_id, delta).await {
        QuantityChange::NotFound => writeln!(out, "Product {product_id} is not in the cart.")?,
        QuantityChange::Rejected => {
            writeln!(out, "Quantity of product {product_id} cannot go below zero.")?;
        }
        QuantityChange::Updated { quantity } => {
            writeln!(out, "Product {product_id} quantity is now {quantity}.")?;
        }
        QuantityChange::Removed => writeln!(out, "Product {product_id} removed from the cart.")?,
        QuantityChange::Failed => return Err(AppError::Rejected("Updating quantity")),
    }
    Ok(())
}

/// Delete the picked products.
pub async fn delete_selected(
    config: &StorefrontConfig,
    pick: &Pick,
    out: &mut impl Write,
) -> Result<()> {
    let mut page = open(config).await?;
    apply(&mut page, pick);

    match page.delete_selected().await {
        DeleteOutcome::Deleted(count) => writeln!(out, "Deleted {count} item(s).")?,
        DeleteOutcome::Failed => return Err(AppError::Rejected("Deleting products")),
    }
    Ok(())
}

/// Check out the picked products.
pub async fn checkout(
    config: &StorefrontConfig,
    pick: &Pick,
    out: &mut impl Write,
) -> Result<()> {
    let mut page = open(config).await?;
    apply(&mut page, pick);

    let id = page.checkout().await?;
    let quote = page.quote()?;

    writeln!(out, "Checkout #{id} created for {}.", quote.summary)?;
    writeln!(out, "Continue at {}", page.navigator().location())?;
    Ok(())
}
