//! Product listing and detail commands.

use std::io::Write;
use std::sync::Arc;

use askama::Template;
use blanja_core::ProductId;
use blanja_storefront::api::{BlanjaClient, ProductFilter, ProductPage};
use blanja_storefront::components::ProductSection;
use blanja_storefront::config::StorefrontConfig;
use blanja_storefront::credentials::NoCredentials;
use blanja_storefront::Result;

/// What `blanja products` was asked for.
pub struct ListRequest {
    pub filter: ProductFilter,
    pub condition: Option<String>,
    pub html: bool,
}

fn client(config: &StorefrontConfig) -> Result<BlanjaClient> {
    // Product endpoints are public
    Ok(BlanjaClient::new(config, Arc::new(NoCredentials))?)
}

/// List one page of products.
pub async fn list(
    config: &StorefrontConfig,
    request: &ListRequest,
    out: &mut impl Write,
) -> Result<()> {
    let client = client(config)?;

    let (page, title) = match &request.condition {
        Some(condition) => (
            client.get_products_by_condition(condition).await?,
            format!("Condition: {condition}"),
        ),
        None => (
            client.get_all_products(&request.filter).await?,
            request
                .filter
                .keyword
                .as_ref()
                .map_or_else(|| "Products".to_string(), |k| format!("Results for \"{k}\"")),
        ),
    };

    if request.html {
        let section = ProductSection::new(title, describe(&page)).with_products(&page.products)?;
        writeln!(out, "{}", section.render()?)?;
        return Ok(());
    }

    writeln!(out, "{title}")?;
    if page.products.is_empty() {
        writeln!(out, "Product is empty.")?;
        return Ok(());
    }
    for product in &page.products {
        writeln!(
            out,
            "{:>6}  {:<40}  {:>16}  {}",
            product.id.as_u32(),
            product.name,
            product.price.display(),
            product.seller_name.as_deref().unwrap_or("-"),
        )?;
    }
    writeln!(out, "{}", describe(&page))?;
    Ok(())
}

/// Show one product in detail.
pub async fn show(
    config: &StorefrontConfig,
    id: ProductId,
    out: &mut impl Write,
) -> Result<()> {
    let product = client(config)?.get_product(id).await?;

    writeln!(out, "{} (#{})", product.name, product.id)?;
    writeln!(out, "Price:     {}", product.price)?;
    if let Some(stock) = product.stock {
        writeln!(out, "Stock:     {stock}")?;
    }
    if let Some(condition) = &product.condition {
        writeln!(out, "Condition: {condition}")?;
    }
    if let Some(rating) = product.rating {
        writeln!(out, "Rating:    {rating:.1}")?;
    }
    if let Some(seller) = &product.seller_name {
        writeln!(out, "Seller:    {seller}")?;
    }
    if !product.sizes.is_empty() {
        let sizes: Vec<_> = product.sizes.iter().map(|s| s.value.as_str()).collect();
        writeln!(out, "Sizes:     {}", sizes.join(", "))?;
    }
    if !product.colors.is_empty() {
        let colors: Vec<_> = product.colors.iter().map(|c| c.value.as_str()).collect();
        writeln!(out, "Colors:    {}", colors.join(", "))?;
    }
    if let Some(description) = &product.description {
        writeln!(out)?;
        writeln!(out, "{description}")?;
    }
    Ok(())
}

fn describe(page: &ProductPage) -> String {
    let p = page.pagination;
    format!(
        "Page {} of {} ({} products)",
        p.current_page, p.total_page, p.total_data
    )
}
