//! Wire types for the Blanja REST backend.
//!
//! Response types are lenient: optional display fields default when the
//! backend omits them, so a slimmer payload never fails a whole listing.

use blanja_core::{AddressId, CartId, CategoryId, CheckoutId, Price, ProductId, SellerId};
use serde::{Deserialize, Deserializer, Serialize};

/// Page size the storefront always requests.
pub const PRODUCTS_PAGE_SIZE: u32 = 10;

// =============================================================================
// Envelopes
// =============================================================================

/// `{ "data": ... }` wrapper used by most endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<u16>,
}

/// Raw paginated listing as the backend sends it.
///
/// An empty listing comes back as HTTP 200 with `statusCode: 202`, a `null`
/// or empty `data`, and no pagination fields at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsEnvelope {
    #[serde(default)]
    pub data: Option<Vec<ProductSummary>>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub current_page: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_data: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_page: u32,
}

/// Accept a count written as an integer, a float (`totalPage` comes from a
/// float ceiling), or `null`.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(v) if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked above
            let count = v.ceil() as u32;
            Ok(count)
        }
        Some(v) => Err(serde::de::Error::custom(format!("invalid count: {v}"))),
    }
}

// =============================================================================
// Products
// =============================================================================

/// Product as it appears in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub seller_name: Option<String>,
}

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<u32>,
    pub url: String,
}

/// A size or color option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    #[serde(default)]
    pub id: Option<u32>,
    pub value: String,
}

/// Full product detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub sizes: Vec<ProductOption>,
    #[serde(default)]
    pub colors: Vec<ProductOption>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub seller_name: Option<String>,
}

/// Normalized pagination block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub limit: u32,
    pub total_data: u32,
    pub total_page: u32,
}

/// Normalized product listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub pagination: Pagination,
}

impl From<ProductsEnvelope> for ProductPage {
    fn from(envelope: ProductsEnvelope) -> Self {
        Self {
            products: envelope.data.unwrap_or_default(),
            pagination: Pagination {
                current_page: envelope.current_page,
                limit: envelope.limit,
                total_data: envelope.total_data,
                total_page: envelope.total_page,
            },
        }
    }
}

/// Listing filters as the UI holds them.
///
/// Unset filters are left out of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub keyword: Option<String>,
    pub colors: Option<String>,
    pub sizes: Option<String>,
    pub category: Option<String>,
    pub seller: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            keyword: None,
            colors: None,
            sizes: None,
            category: None,
            seller: None,
            page: 1,
        }
    }
}

impl ProductFilter {
    /// First page of a free-text search.
    #[must_use]
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    /// Backend query parameters, page size fixed at [`PRODUCTS_PAGE_SIZE`].
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        let optional = [
            ("search", &self.keyword),
            ("colors", &self.colors),
            ("sizes", &self.sizes),
            ("category", &self.category),
            ("seller", &self.seller),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        pairs.push(("page", self.page.max(1).to_string()));
        pairs.push(("limit", PRODUCTS_PAGE_SIZE.to_string()));
        pairs
    }
}

// =============================================================================
// Carts
// =============================================================================

/// A product inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// A cart with its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub products: Vec<CartProduct>,
}

/// Body of `cart/addProduct` and `cart/removeProduct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProductRequest {
    pub cart_id: CartId,
    pub product_id: ProductId,
    /// Always the magnitude of the change; the endpoint picks the direction.
    pub quantity: u32,
}

/// Body of `cart/deleteAllProduct`: parallel lists, index `i` of each
/// describing one line item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteAllProductsRequest {
    pub cart_id: Vec<CartId>,
    pub product_id: Vec<ProductId>,
}

// =============================================================================
// Addresses
// =============================================================================

/// Shipping address profile.
///
/// The backend serializes its embedded model ID as `ID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "ID", alias = "id")]
    pub id: AddressId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub main_address: String,
    #[serde(default)]
    pub detail_address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub postal_code: String,
    /// `"on"` for the primary address, `"off"` otherwise.
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub city: String,
}

impl Address {
    /// Whether this is the shopper's primary address.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary.eq_ignore_ascii_case("on")
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Cart reference inside a checkout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCart {
    pub id: CartId,
}

/// Body of `checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub carts: Vec<CheckoutCart>,
    pub delivery: Price,
    pub summary: Price,
}

/// Response of `checkout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(rename = "checkoutID")]
    pub checkout_id: CheckoutId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_filter_query_pairs_default() {
        let pairs = ProductFilter::default().query_pairs();
        assert_eq!(
            pairs,
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn test_filter_query_pairs_all_fields() {
        let filter = ProductFilter {
            keyword: Some("jacket".to_string()),
            colors: Some("black".to_string()),
            sizes: Some("XL".to_string()),
            category: Some("3".to_string()),
            seller: Some("9".to_string()),
            page: 4,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("search", "jacket".to_string()),
                ("colors", "black".to_string()),
                ("sizes", "XL".to_string()),
                ("category", "3".to_string()),
                ("seller", "9".to_string()),
                ("page", "4".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_page_zero_becomes_one() {
        let filter = ProductFilter {
            page: 0,
            ..ProductFilter::default()
        };
        assert!(filter.query_pairs().contains(&("page", "1".to_string())));
    }

    #[test]
    fn test_products_envelope_normalizes() {
        let envelope: ProductsEnvelope = serde_json::from_value(json!({
            "status": "success",
            "statusCode": 200,
            "data": [{
                "id": 1,
                "name": "Denim Jacket",
                "price": 250000,
                "image": "https://cdn.blanja.id/1.png",
                "rating": 4.5,
                "condition": "new",
                "category_id": 2,
                "category_name": "Jacket",
                "seller_id": 7,
                "seller_name": "Zalora Cloth"
            }],
            "currentPage": 1,
            "limit": 10,
            "totalData": 11,
            "totalPage": 2.0
        }))
        .unwrap();

        let page = ProductPage::from(envelope);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].price, Price::from_rupiah(250_000));
        assert_eq!(
            page.pagination,
            Pagination {
                current_page: 1,
                limit: 10,
                total_data: 11,
                total_page: 2,
            }
        );
    }

    #[test]
    fn test_empty_listing_normalizes_to_empty_page() {
        let envelope: ProductsEnvelope = serde_json::from_value(json!({
            "status": "no content",
            "statusCode": 202,
            "message": "Product is empty.",
            "data": null
        }))
        .unwrap();

        let page = ProductPage::from(envelope);
        assert!(page.products.is_empty());
        assert_eq!(page.pagination, Pagination::default());
    }

    #[test]
    fn test_negative_count_rejected() {
        let result = serde_json::from_value::<ProductsEnvelope>(json!({ "totalPage": -1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_product_detail_reads_desc() {
        let detail: ProductDetail = serde_json::from_value(json!({
            "id": 5,
            "name": "Sneakers",
            "price": 420000,
            "images": [{ "id": 1, "url": "https://cdn.blanja.id/5.png" }],
            "sizes": [{ "id": 1, "value": "42" }],
            "colors": [{ "id": 2, "value": "white" }],
            "stock": 8,
            "desc": "Canvas sneakers"
        }))
        .unwrap();
        assert_eq!(detail.description.as_deref(), Some("Canvas sneakers"));
        assert_eq!(detail.sizes[0].value, "42");
    }

    #[test]
    fn test_address_reads_uppercase_id() {
        let address: Address = serde_json::from_value(json!({
            "ID": 3,
            "name": "Rumah",
            "main_address": "Jl. Merdeka 1",
            "detail_address": "Blok A",
            "phone": "08123456789",
            "postal_code": "40115",
            "primary": "on",
            "city": "Bandung"
        }))
        .unwrap();
        assert_eq!(address.id, AddressId::new(3));
        assert!(address.is_primary());
    }

    #[test]
    fn test_delete_all_request_shape() {
        let request = DeleteAllProductsRequest {
            cart_id: vec![CartId::new(1), CartId::new(2)],
            product_id: vec![ProductId::new(10), ProductId::new(20)],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "cart_id": [1, 2], "product_id": [10, 20] })
        );
    }

    #[test]
    fn test_checkout_request_shape() {
        let request = CheckoutRequest {
            carts: vec![CheckoutCart { id: CartId::new(1) }],
            delivery: Price::from_rupiah(250),
            summary: Price::from_rupiah(2750),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "carts": [{ "id": 1 }], "delivery": 250, "summary": 2750 })
        );

        let response: CheckoutResponse =
            serde_json::from_value(json!({ "message": "ok", "checkoutID": 44 })).unwrap();
        assert_eq!(response.checkout_id, CheckoutId::new(44));
    }
}
