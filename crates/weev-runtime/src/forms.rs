//! Form state and client-side normalization.
//!
//! Only presentation rules live here. Business validation is the
//! server's job.

use serde::{Deserialize, Serialize};
use weev_core::types::{NewProduct, RegisterRequest, UserRole};
use weev_core::{Error, Result};

use crate::messages;

/// Registration form.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub brand_name: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("brand_name", &self.brand_name)
            .finish_non_exhaustive()
    }
}

impl RegisterForm {
    /// Creates a form for the given role with an empty brand name.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
            brand_name: String::new(),
        }
    }

    /// Sets the brand name.
    pub fn with_brand_name(mut self, brand_name: impl Into<String>) -> Self {
        self.brand_name = brand_name.into();
        self
    }

    /// Returns whether the brand-name field is required for this role.
    #[inline]
    pub fn brand_name_required(&self) -> bool {
        self.role.is_brand_admin()
    }

    /// Builds the request payload.
    ///
    /// The brand name is only sent for brand administrators, for whom a
    /// blank brand name is rejected before any request.
    pub fn to_request(&self) -> Result<RegisterRequest> {
        let brand_name = if self.brand_name_required() {
            let brand_name = self.brand_name.trim();
            if brand_name.is_empty() {
                return Err(Error::invalid_input().with_message(messages::BRAND_NAME_REQUIRED));
            }
            Some(brand_name.to_owned())
        } else {
            None
        };

        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role.clone(),
            brand_name,
        })
    }
}

/// Product creation form, holding raw input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
}

impl ProductForm {
    /// Parses the price input.
    ///
    /// Unparseable and zero prices are treated as absent.
    pub fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price != 0.0)
    }

    /// Returns the image URL, absent when blank.
    pub fn parsed_image_url(&self) -> Option<String> {
        let url = self.image_url.trim();
        (!url.is_empty()).then(|| url.to_owned())
    }

    /// Builds the request payload.
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.parsed_price(),
            image_url: self.parsed_image_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use weev_core::ErrorKind;

    use super::*;

    #[test]
    fn brand_name_only_required_for_brand_admins() {
        let consumer = RegisterForm::new("Ana", "ana@example.com", "pw", UserRole::Consumer)
            .with_brand_name("ignored");
        assert!(!consumer.brand_name_required());
        assert_eq!(consumer.to_request().unwrap().brand_name, None);

        let admin = RegisterForm::new("Carlos", "c@andes.com", "pw", UserRole::BrandAdmin)
            .with_brand_name("  Andes ");
        assert!(admin.brand_name_required());
        assert_eq!(admin.to_request().unwrap().brand_name.as_deref(), Some("Andes"));
    }

    #[test]
    fn blank_brand_name_is_rejected() {
        let admin = RegisterForm::new("Carlos", "c@andes.com", "pw", UserRole::BrandAdmin)
            .with_brand_name("   ");
        let error = admin.to_request().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn price_parsing() {
        let mut form = ProductForm::default();
        assert_eq!(form.parsed_price(), None);

        form.price = "12.5".into();
        assert_eq!(form.parsed_price(), Some(12.5));

        form.price = "0".into();
        assert_eq!(form.parsed_price(), None);

        form.price = "doce".into();
        assert_eq!(form.parsed_price(), None);
    }

    #[test]
    fn blank_image_url_is_absent() {
        let form = ProductForm {
            name: "Café".into(),
            image_url: "  ".into(),
            ..ProductForm::default()
        };
        let product = form.to_new_product();
        assert_eq!(product.image_url, None);
        assert_eq!(product.price, None);
    }
}
