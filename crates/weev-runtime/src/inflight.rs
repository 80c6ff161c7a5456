//! Per-action in-flight tracking.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use strum::{AsRefStr, Display, IntoStaticStr};
use weev_core::{Error, Result};

use crate::messages;

/// A user action that issues a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Login,
    Register,
    Logout,
    Activate,
    CreateProduct,
    ClaimReward,
}

/// Set of actions whose request is still pending.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    pending: Arc<Mutex<HashSet<ActionKind>>>,
}

impl InFlight {
    /// Marks the action as pending.
    ///
    /// Fails with a conflict if the same action is already pending.
    pub fn begin(&self, kind: ActionKind) -> Result<InFlightGuard> {
        if !self.lock().insert(kind) {
            return Err(Error::conflict().with_message(messages::ACTION_IN_PROGRESS));
        }
        Ok(InFlightGuard {
            kind,
            pending: self.pending.clone(),
        })
    }

    /// Returns whether the action is pending.
    pub fn is_pending(&self, kind: ActionKind) -> bool {
        self.lock().contains(&kind)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ActionKind>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears the in-flight flag on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    kind: ActionKind,
    pending: Arc<Mutex<HashSet<ActionKind>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.kind);
    }
}
