//! Top-level views, prompts and navigation.

use strum::{AsRefStr, Display, IntoStaticStr};
use weev_core::types::{Session, UserRole};

/// Dashboard variant, a pure function of the user's role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DashboardVariant {
    Consumer,
    Brand,
    /// The role is not one the client can render.
    UnsupportedRole(String),
}

impl DashboardVariant {
    /// Selects the variant for a role.
    pub fn for_role(role: &UserRole) -> Self {
        match role {
            UserRole::Consumer => Self::Consumer,
            UserRole::BrandAdmin => Self::Brand,
            UserRole::Unknown(role) => Self::UnsupportedRole(role.clone()),
        }
    }
}

/// The visible top-level view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Landing,
    Dashboard(DashboardVariant),
}

impl View {
    /// Returns whether the dashboard is shown.
    #[inline]
    pub fn is_dashboard(&self) -> bool {
        matches!(self, Self::Dashboard(_))
    }

    /// Returns the dashboard variant, if the dashboard is shown.
    pub fn variant(&self) -> Option<&DashboardVariant> {
        match self {
            Self::Landing => None,
            Self::Dashboard(variant) => Some(variant),
        }
    }
}

/// A modal form owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Prompt {
    Login,
    Register,
    CreateProduct,
}

/// Open/closed state of every prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prompts {
    login: bool,
    register: bool,
    create_product: bool,
}

impl Prompts {
    fn slot(&mut self, prompt: Prompt) -> &mut bool {
        match prompt {
            Prompt::Login => &mut self.login,
            Prompt::Register => &mut self.register,
            Prompt::CreateProduct => &mut self.create_product,
        }
    }

    pub fn open(&mut self, prompt: Prompt) {
        *self.slot(prompt) = true;
    }

    pub fn close(&mut self, prompt: Prompt) {
        *self.slot(prompt) = false;
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self, prompt: Prompt) -> bool {
        match prompt {
            Prompt::Login => self.login,
            Prompt::Register => self.register,
            Prompt::CreateProduct => self.create_product,
        }
    }

    /// Returns the open prompts.
    pub fn open_prompts(&self) -> Vec<Prompt> {
        [Prompt::Login, Prompt::Register, Prompt::CreateProduct]
            .into_iter()
            .filter(|p| self.is_open(*p))
            .collect()
    }
}

/// Navigation bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// Login and register entry points.
    Guest,
    /// The member's display name and a logout entry.
    Member { name: String },
}

impl From<&Session> for NavState {
    fn from(session: &Session) -> Self {
        match session.user() {
            Some(user) => Self::Member {
                name: user.name.clone(),
            },
            None => Self::Guest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_follows_role() {
        assert_eq!(
            DashboardVariant::for_role(&UserRole::Consumer),
            DashboardVariant::Consumer
        );
        assert_eq!(
            DashboardVariant::for_role(&UserRole::BrandAdmin),
            DashboardVariant::Brand
        );
        assert_eq!(
            DashboardVariant::for_role(&UserRole::Unknown("auditor".into())),
            DashboardVariant::UnsupportedRole("auditor".into())
        );
    }

    #[test]
    fn prompts_open_and_close() {
        let mut prompts = Prompts::default();
        prompts.open(Prompt::Login);
        prompts.open(Prompt::CreateProduct);
        assert_eq!(
            prompts.open_prompts(),
            vec![Prompt::Login, Prompt::CreateProduct]
        );

        prompts.close(Prompt::Login);
        assert!(!prompts.is_open(Prompt::Login));

        prompts.close_all();
        assert!(prompts.open_prompts().is_empty());
    }

    #[test]
    fn guests_have_no_name() {
        assert_eq!(NavState::from(&Session::Anonymous), NavState::Guest);
    }
}
