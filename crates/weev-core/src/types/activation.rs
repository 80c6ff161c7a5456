//! Product activations.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{Product, Reward};

/// A normalized activation code.
///
/// Codes are trimmed and uppercased before they are sent; a code that is
/// empty after trimming cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationCode(String);

impl ActivationCode {
    /// Normalizes raw user input into a code.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalized code.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded activation of a product by a consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    /// Activation identifier.
    pub id: i64,

    /// The activated product.
    #[serde(rename = "producto", default)]
    pub product: Option<Product>,

    /// When the activation happened.
    #[serde(rename = "fecha_activacion", default)]
    pub activated_at: Option<DateTime>,

    /// Points awarded for this activation.
    #[serde(rename = "puntos_ganados", default)]
    pub points_earned: i64,
}

impl Activation {
    /// Returns the activated product's name, if the server sent it.
    pub fn product_name(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.name.as_str())
    }
}

/// Response of `POST /api/activate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationOutcome {
    /// Informational message from the server.
    #[serde(default)]
    pub message: Option<String>,

    /// The recorded activation.
    #[serde(rename = "activacion")]
    pub activation: Activation,

    /// Points earned by this activation.
    #[serde(rename = "puntos_ganados", default)]
    pub points_earned: i64,

    /// Point balance after the activation.
    #[serde(rename = "puntos_totales", default)]
    pub total_points: i64,

    /// Level after the activation.
    #[serde(rename = "nivel_actual", default)]
    pub level: i64,

    /// Rewards granted by this activation.
    #[serde(rename = "recompensas_otorgadas", default)]
    pub rewards_granted: Vec<Reward>,
}

/// Response of `GET /api/my-activations`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivationHistory {
    /// Activations of the signed-in consumer, newest first.
    #[serde(rename = "activaciones", default)]
    pub activations: Vec<Activation>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        let code = ActivationCode::normalize("  abc123 \n").unwrap();
        assert_eq!(code.as_str(), "ABC123");
        assert_eq!(serde_json::to_value(&code).unwrap(), json!("ABC123"));
    }

    #[test]
    fn normalize_rejects_blank_input() {
        assert!(ActivationCode::normalize("").is_none());
        assert!(ActivationCode::normalize(" \t ").is_none());
    }

    #[test]
    fn outcome_deserializes() {
        let outcome: ActivationOutcome = serde_json::from_value(json!({
            "message": "Producto activado exitosamente",
            "activacion": {
                "id": 9,
                "producto": {"id": 1, "nombre": "Café Premium"},
                "fecha_activacion": "2024-06-01T12:00:00",
                "puntos_ganados": 10
            },
            "puntos_ganados": 10,
            "puntos_totales": 110,
            "nivel_actual": 2,
            "recompensas_otorgadas": [{"id": 4, "nombre": "Descuento"}]
        }))
        .unwrap();

        assert_eq!(outcome.activation.product_name(), Some("Café Premium"));
        assert_eq!(outcome.total_points, 110);
        assert_eq!(outcome.rewards_granted.len(), 1);
    }
}
