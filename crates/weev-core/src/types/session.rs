//! Client-side session.

use super::{User, UserRole};

/// The client's view of who is signed in.
///
/// A user is present exactly when the session is authenticated; the
/// variants make any other combination unrepresentable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// The server confirmed this user.
    Authenticated(User),
}

impl Session {
    /// Returns whether a user is signed in.
    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the signed-in user.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Returns the role of the signed-in user.
    pub fn role(&self) -> Option<&UserRole> {
        self.user().map(|user| &user.role)
    }

    /// Resets the session to anonymous, returning the previous user.
    pub fn clear(&mut self) -> Option<User> {
        match std::mem::take(self) {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}
