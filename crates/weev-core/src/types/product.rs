//! Products owned by brands.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// A product that consumers can activate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: i64,

    /// Product name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Free-form description.
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Code consumers enter to activate the product.
    #[serde(rename = "codigo_activacion", default)]
    pub activation_code: Option<String>,

    /// Category label.
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,

    /// Retail price.
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,

    /// Image location.
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,

    /// Name of the owning brand.
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,

    /// Creation date.
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<DateTime>,

    /// Number of activations recorded for the product.
    #[serde(rename = "total_activaciones", default)]
    pub total_activations: i64,

    /// Whether the product can currently be activated.
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Request payload for `POST /api/products`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Free-form description.
    #[serde(rename = "descripcion")]
    pub description: String,

    /// Category label.
    #[serde(rename = "categoria")]
    pub category: String,

    /// Retail price, `null` when not given.
    #[serde(rename = "precio")]
    pub price: Option<f64>,

    /// Image location, `null` when not given.
    #[serde(rename = "imagen_url")]
    pub image_url: Option<String>,
}

/// Response of `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductEnvelope {
    /// Informational message from the server.
    #[serde(default)]
    pub message: Option<String>,

    /// The created product.
    #[serde(rename = "producto", default)]
    pub product: Option<Product>,
}

/// Response of `GET /api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryList {
    /// Distinct categories of active products.
    #[serde(rename = "categorias", default)]
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_product_sends_nulls_for_missing_optionals() {
        let payload = NewProduct {
            name: "Café".into(),
            description: "Tostado natural".into(),
            category: "bebidas".into(),
            price: None,
            image_url: None,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "nombre": "Café",
                "descripcion": "Tostado natural",
                "categoria": "bebidas",
                "precio": null,
                "imagen_url": null
            })
        );
    }

    #[test]
    fn product_defaults_missing_fields() {
        let product: Product = serde_json::from_value(json!({"id": 4, "nombre": "Té"})).unwrap();
        assert!(product.active);
        assert_eq!(product.total_activations, 0);
        assert!(product.brand.is_none());
    }
}
