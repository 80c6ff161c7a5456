//! Role-dependent dashboard snapshots.
//!
//! Snapshots are read-only projections of server state. They are fetched
//! fresh on every navigation into the dashboard and never merged.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{Activation, User, UserReward};

/// Headline numbers of the consumer dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsumerMetrics {
    #[serde(rename = "puntos_totales", default)]
    pub total_points: i64,
    #[serde(rename = "nivel_actual", default)]
    pub level: i64,
    #[serde(rename = "total_activaciones", default)]
    pub total_activations: i64,
    #[serde(rename = "recompensas_disponibles", default)]
    pub available_rewards: i64,
    /// Points still missing for the next level.
    #[serde(rename = "puntos_siguiente_nivel", default)]
    pub points_to_next_level: i64,
}

/// A brand the consumer activates often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteBrand {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activaciones", default)]
    pub activations: i64,
}

/// Activation count for one month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActivations {
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "activaciones", default)]
    pub activations: i64,
}

/// Response of `GET /api/user-dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerDashboard {
    /// The consumer as currently stored by the server.
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,

    #[serde(rename = "metricas", default)]
    pub metrics: ConsumerMetrics,

    #[serde(rename = "activaciones_recientes", default)]
    pub recent_activations: Vec<Activation>,

    #[serde(rename = "recompensas_recientes", default)]
    pub recent_rewards: Vec<UserReward>,

    #[serde(rename = "marcas_favoritas", default)]
    pub favorite_brands: Vec<FavoriteBrand>,

    #[serde(rename = "activaciones_por_mes", default)]
    pub monthly_activations: Vec<MonthlyActivations>,
}

/// The brand managed by the signed-in administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "logo_url", default)]
    pub logo_url: Option<String>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<DateTime>,
    #[serde(rename = "total_productos", default)]
    pub total_products: i64,
    #[serde(rename = "total_activaciones", default)]
    pub total_activations: i64,
}

/// Headline numbers of the brand dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandMetrics {
    #[serde(rename = "total_productos", default)]
    pub total_products: i64,
    #[serde(rename = "productos_activos", default)]
    pub active_products: i64,
    #[serde(rename = "total_activaciones", default)]
    pub total_activations: i64,
    #[serde(rename = "usuarios_unicos", default)]
    pub unique_users: i64,
    #[serde(rename = "total_recompensas", default)]
    pub total_rewards: i64,
    #[serde(rename = "recompensas_reclamadas", default)]
    pub claimed_rewards: i64,
    /// Percentage of granted rewards that were claimed.
    #[serde(rename = "tasa_reclamacion", default)]
    pub claim_rate: f64,
}

/// A product ranked by activations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activaciones", default)]
    pub activations: i64,
}

/// Activation count for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivations {
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "activaciones", default)]
    pub activations: i64,
}

/// A recent activation of one of the brand's products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandActivation {
    pub id: i64,
    #[serde(rename = "producto_nombre", default)]
    pub product_name: String,
    #[serde(rename = "usuario_nombre", default)]
    pub user_name: String,
    #[serde(rename = "fecha_activacion", default)]
    pub activated_at: Option<DateTime>,
    #[serde(rename = "puntos_ganados", default)]
    pub points_earned: i64,
}

/// Response of `GET /api/brand-dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDashboard {
    #[serde(rename = "marca", default)]
    pub brand: Option<Brand>,

    #[serde(rename = "metricas", default)]
    pub metrics: BrandMetrics,

    #[serde(rename = "productos_top", default)]
    pub top_products: Vec<TopProduct>,

    #[serde(rename = "activaciones_por_dia", default)]
    pub daily_activations: Vec<DailyActivations>,

    #[serde(rename = "activaciones_recientes", default)]
    pub recent_activations: Vec<BrandActivation>,
}

/// The dashboard snapshot currently held by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardSnapshot {
    /// Consumer dashboard plus the available-rewards list.
    Consumer {
        dashboard: ConsumerDashboard,
        rewards: Vec<UserReward>,
    },
    /// Brand administrator dashboard.
    Brand(BrandDashboard),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn consumer_dashboard_deserializes() {
        let dashboard: ConsumerDashboard = serde_json::from_value(json!({
            "metricas": {
                "total_activaciones": 3,
                "recompensas_disponibles": 1,
                "puntos_totales": 30,
                "nivel_actual": 1,
                "puntos_siguiente_nivel": 70
            },
            "activaciones_recientes": [],
            "marcas_favoritas": [{"nombre": "Andes", "activaciones": 2}],
            "activaciones_por_mes": [{"mes": "2024-05", "activaciones": 3}]
        }))
        .unwrap();

        assert_eq!(dashboard.metrics.points_to_next_level, 70);
        assert_eq!(dashboard.favorite_brands[0].name, "Andes");
        assert!(dashboard.user.is_none());
        assert!(dashboard.recent_rewards.is_empty());
    }

    #[test]
    fn brand_dashboard_deserializes() {
        let dashboard: BrandDashboard = serde_json::from_value(json!({
            "marca": {"id": 1, "nombre": "Andes", "total_productos": 2},
            "metricas": {
                "total_productos": 2,
                "productos_activos": 2,
                "total_activaciones": 5,
                "usuarios_unicos": 4,
                "tasa_reclamacion": 12.5
            },
            "productos_top": [{"id": 1, "nombre": "Café", "activaciones": 5}],
            "activaciones_recientes": [{
                "id": 8,
                "producto_nombre": "Café",
                "usuario_nombre": "Ana",
                "fecha_activacion": "2024-05-03T09:00:00",
                "puntos_ganados": 10
            }]
        }))
        .unwrap();

        assert_eq!(dashboard.metrics.unique_users, 4);
        assert_eq!(dashboard.metrics.claim_rate, 12.5);
        assert_eq!(dashboard.top_products.len(), 1);
        assert_eq!(dashboard.recent_activations[0].user_name, "Ana");
        assert!(dashboard.daily_activations.is_empty());
    }
}
