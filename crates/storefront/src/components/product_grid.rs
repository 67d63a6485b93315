//! Product cards for listings.

use askama::Template;

use crate::api::ProductSummary;

/// Display-ready view of one listed product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub href: String,
    pub name: String,
    /// Price already formatted as Rupiah.
    pub price: String,
    pub image: Option<String>,
    pub seller: Option<String>,
    /// Rating with one decimal, e.g. `4.5`.
    pub rating: Option<String>,
}

impl From<&ProductSummary> for ProductCard {
    fn from(product: &ProductSummary) -> Self {
        Self {
            href: format!("/products/{}", product.id),
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            seller: product.seller_name.clone(),
            rating: product.rating.map(|r| format!("{r:.1}")),
        }
    }
}

/// A list of product cards.
#[derive(Debug, Clone, Default, Template)]
#[template(path = "components/product_grid.html")]
pub struct ProductGrid {
    pub cards: Vec<ProductCard>,
}

impl ProductGrid {
    #[must_use]
    pub fn new(products: &[ProductSummary]) -> Self {
        Self {
            cards: products.iter().map(ProductCard::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blanja_core::{Price, ProductId};

    use super::*;

    fn summary() -> ProductSummary {
        ProductSummary {
            id: ProductId::new(7),
            name: "Kemeja Flanel".to_string(),
            price: Price::from_rupiah(149_000),
            image: Some("https://cdn.blanja.id/7.png".to_string()),
            rating: Some(4.5),
            condition: Some("new".to_string()),
            category_id: None,
            category_name: None,
            seller_id: None,
            seller_name: Some("Toko Baju".to_string()),
        }
    }

    #[test]
    fn test_card_from_summary() {
        let card = ProductCard::from(&summary());
        assert_eq!(card.href, "/products/7");
        assert_eq!(card.price, "Rp\u{a0}149.000");
        assert_eq!(card.rating.as_deref(), Some("4.5"));
        assert_eq!(card.seller.as_deref(), Some("Toko Baju"));
    }

    #[test]
    fn test_grid_renders_cards() {
        let html = ProductGrid::new(&[summary()]).render().unwrap();
        assert!(html.contains(r#"href="/products/7""#));
        assert!(html.contains("Kemeja Flanel"));
        assert!(html.contains("Toko Baju"));
    }

    #[test]
    fn test_empty_grid() {
        let html = ProductGrid::default().render().unwrap();
        assert!(html.contains("Product is empty."));
    }
}
