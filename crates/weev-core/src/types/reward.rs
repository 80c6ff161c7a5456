//! Rewards granted to consumers.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a granted reward.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RewardState {
    /// Granted and claimable.
    #[serde(rename = "disponible")]
    #[default]
    Available,

    /// Already claimed.
    #[serde(rename = "reclamada")]
    Claimed,

    /// Past its expiration date.
    #[serde(rename = "expirada")]
    Expired,

    /// Any other state string sent by the server.
    #[serde(untagged)]
    Unknown(String),
}

impl RewardState {
    /// Returns the wire representation, as used in the `estado` query.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "disponible",
            Self::Claimed => "reclamada",
            Self::Expired => "expirada",
            Self::Unknown(state) => state,
        }
    }

    /// Returns whether the reward can still be claimed.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// A reward definition attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    /// Reward identifier.
    pub id: i64,

    /// Reward name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Free-form description.
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Reward type (`descuento`, `puntos`, `contenido`, `producto_gratis`).
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,

    /// Human readable value, such as `"15%"` or `"100 puntos"`.
    #[serde(rename = "valor", default)]
    pub value: Option<String>,

    /// Coupon code handed out on claim.
    #[serde(rename = "codigo_cupon", default)]
    pub coupon_code: Option<String>,

    /// Expiration date.
    #[serde(rename = "fecha_expiracion", default)]
    pub expires_at: Option<DateTime>,

    /// Whether the reward is still being granted.
    #[serde(rename = "activa", default)]
    pub active: bool,
}

/// A reward instance granted to the signed-in consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReward {
    /// Reward-instance identifier, used by `POST /api/claim/{id}`.
    pub id: i64,

    /// The reward definition.
    #[serde(rename = "recompensa", default)]
    pub reward: Option<Reward>,

    /// When the reward was granted.
    #[serde(rename = "fecha_otorgada", default)]
    pub granted_at: Option<DateTime>,

    /// When the reward was claimed.
    #[serde(rename = "fecha_reclamada", default)]
    pub claimed_at: Option<DateTime>,

    /// Current state.
    #[serde(rename = "estado", default)]
    pub state: RewardState,
}

/// Response of `GET /api/my-rewards`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RewardList {
    /// Reward instances matching the requested state.
    #[serde(rename = "recompensas", default)]
    pub rewards: Vec<UserReward>,
}

/// Response of `POST /api/claim/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimReceipt {
    /// Informational message from the server.
    #[serde(default)]
    pub message: Option<String>,

    /// The claimed reward instance.
    #[serde(rename = "recompensa", default)]
    pub reward: Option<UserReward>,
}
