//! User-facing copy.

pub const LOGIN_SUCCESS: &str = "¡Bienvenido de vuelta!";
pub const REGISTER_SUCCESS: &str = "¡Registro exitoso! Bienvenido a Weev";
pub const LOGOUT_SUCCESS: &str = "Sesión cerrada correctamente";
pub const ACTIVATION_SUCCESS: &str = "¡Producto activado! Revisa tus recompensas";
pub const PRODUCT_CREATED: &str = "Producto creado exitosamente";
pub const REWARD_CLAIMED: &str = "¡Recompensa reclamada exitosamente!";

pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const REGISTER_FAILED: &str = "Error al registrarse";
pub const LOGOUT_FAILED: &str = "Error al cerrar sesión";
pub const ACTIVATION_FAILED: &str = "Error al activar producto";
pub const PRODUCT_FAILED: &str = "Error al crear producto";
pub const CLAIM_FAILED: &str = "Error al reclamar recompensa";
pub const LOAD_FAILED: &str = "Error al cargar datos";

/// Toast shown for any transport failure.
pub const CONNECTION_ERROR: &str = "Error de conexión";
/// Inline activation panel text for a transport failure.
pub const CONNECTION_ERROR_RETRY: &str = "Error de conexión. Inténtalo de nuevo.";

pub const EMPTY_ACTIVATION_CODE: &str = "Por favor ingresa un código de activación";
pub const BRAND_NAME_REQUIRED: &str = "Por favor ingresa el nombre de tu marca";
pub const NOT_SIGNED_IN: &str = "Inicia sesión para continuar";
pub const UNSUPPORTED_ROLE: &str = "Tipo de usuario no soportado";
pub const ACTION_IN_PROGRESS: &str = "La operación ya está en curso";
pub const IN_DEVELOPMENT: &str = "Funcionalidad en desarrollo";

pub const NO_RECENT_ACTIVATIONS: &str = "No tienes activaciones recientes.";
pub const NO_AVAILABLE_REWARDS: &str = "No tienes recompensas disponibles.";
pub const NO_PRODUCTS: &str = "No tienes productos creados.";
pub const NO_BRAND_ACTIVATIONS: &str = "No hay activaciones recientes.";
