//! Catalogue of API endpoints consumed by the client.

use strum::{AsRefStr, Display, IntoStaticStr};

use crate::types::RewardState;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// An endpoint of the weev API.
///
/// Paths are relative, so they resolve against any configured base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /api/auth/check-auth`
    CheckAuth,
    /// `GET /api/auth/me`
    Me,
    /// `POST /api/auth/login`
    Login,
    /// `POST /api/auth/register`
    Register,
    /// `POST /api/auth/logout`
    Logout,
    /// `POST /api/activate`
    Activate,
    /// `POST /api/products`
    CreateProduct,
    /// `GET /api/user-dashboard`
    UserDashboard,
    /// `GET /api/brand-dashboard`
    BrandDashboard,
    /// `GET /api/my-rewards?estado={state}`
    MyRewards { state: RewardState },
    /// `POST /api/claim/{id}`
    Claim { id: i64 },
    /// `GET /api/my-activations`
    MyActivations,
    /// `GET /api/categories`
    Categories,
}

impl Endpoint {
    /// Returns the HTTP method of the endpoint.
    pub const fn method(&self) -> Method {
        match self {
            Self::Login
            | Self::Register
            | Self::Logout
            | Self::Activate
            | Self::CreateProduct
            | Self::Claim { .. } => Method::Post,
            Self::CheckAuth
            | Self::Me
            | Self::UserDashboard
            | Self::BrandDashboard
            | Self::MyRewards { .. }
            | Self::MyActivations
            | Self::Categories => Method::Get,
        }
    }

    /// Returns the path relative to the API base URL, including any query.
    pub fn path(&self) -> String {
        match self {
            Self::CheckAuth => "api/auth/check-auth".to_owned(),
            Self::Me => "api/auth/me".to_owned(),
            Self::Login => "api/auth/login".to_owned(),
            Self::Register => "api/auth/register".to_owned(),
            Self::Logout => "api/auth/logout".to_owned(),
            Self::Activate => "api/activate".to_owned(),
            Self::CreateProduct => "api/products".to_owned(),
            Self::UserDashboard => "api/user-dashboard".to_owned(),
            Self::BrandDashboard => "api/brand-dashboard".to_owned(),
            Self::MyRewards { state } => format!("api/my-rewards?estado={}", state.as_str()),
            Self::Claim { id } => format!("api/claim/{id}"),
            Self::MyActivations => "api/my-activations".to_owned(),
            Self::Categories => "api/categories".to_owned(),
        }
    }

    /// Returns whether the endpoint changes server state.
    #[inline]
    pub const fn is_mutating(&self) -> bool {
        matches!(self.method(), Method::Post)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} /{}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_relative() {
        assert_eq!(Endpoint::CheckAuth.path(), "api/auth/check-auth");
        assert_eq!(
            Endpoint::MyRewards {
                state: RewardState::Available
            }
            .path(),
            "api/my-rewards?estado=disponible"
        );
        assert_eq!(Endpoint::Claim { id: 42 }.path(), "api/claim/42");
    }

    #[test]
    fn methods() {
        assert_eq!(Endpoint::Logout.method(), Method::Post);
        assert_eq!(Endpoint::Me.method(), Method::Get);
        assert!(Endpoint::Claim { id: 1 }.is_mutating());
        assert!(!Endpoint::Categories.is_mutating());
    }

    #[test]
    fn display() {
        assert_eq!(Endpoint::Activate.to_string(), "POST /api/activate");
    }
}
