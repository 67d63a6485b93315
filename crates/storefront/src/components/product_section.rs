//! Titled group of product listings (e.g. "New", "Popular").

use askama::Template;

use super::product_grid::ProductGrid;
use crate::api::ProductSummary;

/// A title and a short description above nested content.
#[derive(Debug, Clone, Template)]
#[template(path = "components/product_section.html")]
pub struct ProductSection {
    title: String,
    description: String,
    /// Pre-rendered HTML placed under the heading.
    content: String,
}

impl ProductSection {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            content: String::new(),
        }
    }

    /// Nest any rendered component.
    ///
    /// # Errors
    ///
    /// Returns an error if `child` fails to render.
    pub fn with_child(mut self, child: &impl Template) -> askama::Result<Self> {
        self.content = child.render()?;
        Ok(self)
    }

    /// Nest a grid of product cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid fails to render.
    pub fn with_products(self, products: &[ProductSummary]) -> askama::Result<Self> {
        self.with_child(&ProductGrid::new(products))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blanja_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_section_wraps_child() {
        let product = ProductSummary {
            id: ProductId::new(1),
            name: "Tas Ransel".to_string(),
            price: Price::from_rupiah(85_000),
            image: None,
            rating: None,
            condition: None,
            category_id: None,
            category_name: None,
            seller_id: None,
            seller_name: None,
        };

        let html = ProductSection::new("New", "You've never seen it before!")
            .with_products(&[product])
            .unwrap()
            .render()
            .unwrap();

        assert!(html.contains("<h2>New</h2>"));
        assert!(html.contains("never seen it before!"));
        assert!(html.contains(r#"<li class="product-card">"#));
        assert!(html.contains("Tas Ransel"));
    }

    #[test]
    fn test_section_escapes_title() {
        let html = ProductSection::new("<script>", "").render().unwrap();
        assert!(!html.contains("<script>"));
    }
}
