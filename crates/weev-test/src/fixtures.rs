//! Canned wire payloads shaped like the Weev API's responses.

use serde_json::{Value, json};

/// A consumer account.
pub fn consumer_user() -> Value {
    json!({
        "id": 7,
        "nombre": "Ana Pérez",
        "email": "ana@example.com",
        "user_type": "consumer",
        "fecha_registro": "2024-03-01T10:15:30",
        "puntos_totales": 120,
        "nivel_actual": 2,
        "total_activaciones": 12
    })
}

/// A brand administrator account.
pub fn brand_user() -> Value {
    json!({
        "id": 2,
        "nombre": "Carlos Ruiz",
        "email": "carlos@andes.com",
        "user_type": "brand_admin",
        "fecha_registro": "2024-01-10T08:00:00",
        "puntos_totales": 0,
        "nivel_actual": 1,
        "total_activaciones": 0
    })
}

/// An account with a role the client does not know.
pub fn unknown_role_user() -> Value {
    json!({
        "id": 99,
        "nombre": "Root",
        "email": "root@weev.app",
        "user_type": "super_admin"
    })
}

/// `{user}` envelope around an account.
pub fn user_envelope(user: Value) -> Value {
    json!({ "user": user })
}

/// `GET /api/auth/check-auth` answer.
pub fn auth_status(authenticated: bool) -> Value {
    if authenticated {
        json!({ "authenticated": true, "user_type": "consumer" })
    } else {
        json!({ "authenticated": false })
    }
}

/// A product as embedded in activations.
pub fn product() -> Value {
    json!({
        "id": 1,
        "nombre": "Café Premium",
        "descripcion": "Café de altura",
        "codigo_activacion": "CAFE2024",
        "categoria": "bebidas",
        "precio": 12.5,
        "imagen_url": null,
        "marca": "Andes",
        "fecha_creacion": "2024-01-15T09:00:00",
        "total_activaciones": 5,
        "activo": true
    })
}

/// `GET /api/user-dashboard` answer.
pub fn consumer_dashboard() -> Value {
    json!({
        "usuario": consumer_user(),
        "metricas": {
            "total_activaciones": 12,
            "recompensas_disponibles": 1,
            "puntos_totales": 120,
            "nivel_actual": 2,
            "puntos_siguiente_nivel": 80
        },
        "activaciones_recientes": [{
            "id": 31,
            "producto": product(),
            "fecha_activacion": "2024-05-03T09:30:00",
            "puntos_ganados": 10
        }],
        "recompensas_recientes": [],
        "marcas_favoritas": [{ "nombre": "Andes", "activaciones": 7 }],
        "activaciones_por_mes": [{ "mes": "2024-05", "activaciones": 4 }]
    })
}

/// A consumer dashboard without any activity.
pub fn empty_consumer_dashboard() -> Value {
    json!({
        "metricas": {
            "total_activaciones": 0,
            "recompensas_disponibles": 0,
            "puntos_totales": 0,
            "nivel_actual": 1,
            "puntos_siguiente_nivel": 100
        },
        "activaciones_recientes": [],
        "recompensas_recientes": [],
        "marcas_favoritas": [],
        "activaciones_por_mes": []
    })
}

/// `GET /api/my-rewards?estado=disponible` answer with one reward.
pub fn available_rewards() -> Value {
    json!({
        "recompensas": [{
            "id": 11,
            "recompensa": {
                "id": 4,
                "nombre": "Descuento 15%",
                "descripcion": "15% en tu próxima compra",
                "tipo": "descuento",
                "valor": "15%",
                "codigo_cupon": "ANDES15",
                "fecha_expiracion": null,
                "activa": true
            },
            "fecha_otorgada": "2024-05-03T09:30:00",
            "fecha_reclamada": null,
            "estado": "disponible"
        }]
    })
}

/// An empty rewards list.
pub fn no_rewards() -> Value {
    json!({ "recompensas": [] })
}

/// `GET /api/brand-dashboard` answer.
pub fn brand_dashboard() -> Value {
    json!({
        "marca": {
            "id": 1,
            "nombre": "Andes",
            "descripcion": "Café colombiano",
            "logo_url": null,
            "fecha_creacion": "2024-01-10T08:00:00",
            "total_productos": 2,
            "total_activaciones": 5
        },
        "metricas": {
            "total_productos": 2,
            "productos_activos": 2,
            "total_activaciones": 5,
            "usuarios_unicos": 4,
            "total_recompensas": 3,
            "recompensas_reclamadas": 1,
            "tasa_reclamacion": 33.33
        },
        "productos_top": [{ "id": 1, "nombre": "Café Premium", "activaciones": 5 }],
        "activaciones_por_dia": [{ "fecha": "2024-05-03", "activaciones": 2 }],
        "activaciones_recientes": [{
            "id": 31,
            "producto_nombre": "Café Premium",
            "usuario_nombre": "Ana Pérez",
            "fecha_activacion": "2024-05-03T09:30:00",
            "puntos_ganados": 10
        }]
    })
}

/// `POST /api/activate` answer granting one reward.
pub fn activation_outcome() -> Value {
    json!({
        "message": "Producto activado exitosamente",
        "activacion": {
            "id": 32,
            "producto": product(),
            "fecha_activacion": "2024-05-04T10:00:00",
            "puntos_ganados": 10
        },
        "puntos_ganados": 10,
        "puntos_totales": 130,
        "nivel_actual": 2,
        "recompensas_otorgadas": [{
            "id": 4,
            "nombre": "Descuento 15%",
            "tipo": "descuento",
            "valor": "15%",
            "activa": true
        }]
    })
}

/// `POST /api/products` answer.
pub fn created_product() -> Value {
    json!({
        "message": "Producto creado exitosamente",
        "producto": product()
    })
}

/// `POST /api/claim/{id}` answer.
pub fn claim_receipt() -> Value {
    json!({
        "message": "Recompensa reclamada exitosamente",
        "recompensa": {
            "id": 11,
            "fecha_otorgada": "2024-05-03T09:30:00",
            "fecha_reclamada": "2024-05-05T18:00:00",
            "estado": "reclamada"
        }
    })
}

/// `GET /api/my-activations` answer.
pub fn activation_history() -> Value {
    json!({
        "activaciones": [{
            "id": 31,
            "producto": product(),
            "fecha_activacion": "2024-05-03T09:30:00",
            "puntos_ganados": 10
        }]
    })
}

/// `GET /api/categories` answer.
pub fn categories() -> Value {
    json!({ "categorias": ["bebidas", "snacks"] })
}

#[cfg(test)]
mod tests {
    use weev_core::types::{
        ActivationOutcome, BrandDashboard, ClaimReceipt, ConsumerDashboard, RewardList,
        UserEnvelope,
    };

    use super::*;

    #[test]
    fn fixtures_match_wire_types() {
        serde_json::from_value::<UserEnvelope>(user_envelope(consumer_user())).unwrap();
        serde_json::from_value::<UserEnvelope>(user_envelope(brand_user())).unwrap();
        serde_json::from_value::<ConsumerDashboard>(consumer_dashboard()).unwrap();
        serde_json::from_value::<ConsumerDashboard>(empty_consumer_dashboard()).unwrap();
        serde_json::from_value::<BrandDashboard>(brand_dashboard()).unwrap();
        serde_json::from_value::<RewardList>(available_rewards()).unwrap();
        serde_json::from_value::<ActivationOutcome>(activation_outcome()).unwrap();
        serde_json::from_value::<ClaimReceipt>(claim_receipt()).unwrap();
    }
}
