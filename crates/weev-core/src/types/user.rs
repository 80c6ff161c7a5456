//! User identity as returned by the authentication endpoints.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of an account, deciding which dashboard variant renders.
///
/// Roles the client does not know are preserved verbatim in
/// [`UserRole::Unknown`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Consumer activating products and claiming rewards.
    #[serde(rename = "consumer")]
    Consumer,

    /// Administrator of a brand's products and analytics.
    #[serde(rename = "brand_admin")]
    BrandAdmin,

    /// Any other role string sent by the server.
    #[serde(untagged)]
    Unknown(String),
}

impl UserRole {
    /// Returns the wire representation of the role.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Consumer => "consumer",
            Self::BrandAdmin => "brand_admin",
            Self::Unknown(role) => role,
        }
    }

    /// Parses a role from its wire representation.
    pub fn parse(value: &str) -> Self {
        match value {
            "consumer" => Self::Consumer,
            "brand_admin" => Self::BrandAdmin,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Returns whether this is the consumer role.
    #[inline]
    pub fn is_consumer(&self) -> bool {
        matches!(self, Self::Consumer)
    }

    /// Returns whether this is the brand administrator role.
    #[inline]
    pub fn is_brand_admin(&self) -> bool {
        matches!(self, Self::BrandAdmin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated account.
///
/// Fields the client does not model are kept in `extra`, so a user
/// round-trips through the client unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    pub id: i64,

    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Email address.
    pub email: String,

    /// Account role.
    #[serde(rename = "user_type")]
    pub role: UserRole,

    /// Registration date.
    #[serde(rename = "fecha_registro", default)]
    pub registered_at: Option<DateTime>,

    /// Accumulated points.
    #[serde(rename = "puntos_totales", default)]
    pub total_points: i64,

    /// Current loyalty level.
    #[serde(rename = "nivel_actual", default)]
    pub level: i64,

    /// Number of products activated.
    #[serde(rename = "total_activaciones", default)]
    pub total_activations: i64,

    /// Remaining fields as sent by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET /api/auth/check-auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether the session cookie identifies a user.
    pub authenticated: bool,

    /// Role hint sent alongside a positive answer.
    #[serde(rename = "user_type", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Envelope `{user}` returned by login, registration and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The authenticated user.
    pub user: User,

    /// Informational message from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
