//! Session/view controller.
//!
//! The [`Controller`] is the only writer of [`AppState`]. Each operation
//! issues its requests through [`WeevService`], then applies the outcome as
//! a single state transition and reports it with a toast. Failures never
//! leave the client in an intermediate view.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use weev_core::types::{
    Activation, ActivationCode, DashboardSnapshot, LoginRequest, RewardState, Session, User,
    UserReward,
};
use weev_core::{Error, ErrorKind, Result, WeevService};

use crate::config::ControllerConfig;
use crate::forms::{ProductForm, RegisterForm};
use crate::inflight::{ActionKind, InFlight};
use crate::loading::LoadingOverlay;
use crate::messages;
use crate::notification::{NotificationCenter, Toast};
use crate::render::{ActivationPanel, ActivationSummary, Screen};
use crate::view::{DashboardVariant, Prompt, Prompts, View};

/// Tracing target for controller operations.
pub const TRACING_TARGET: &str = "weev_runtime::controller";

/// All client state, mutated only by controller transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: Session,
    pub view: View,
    pub prompts: Prompts,
    /// Latest dashboard snapshot for the current view.
    pub dashboard: Option<DashboardSnapshot>,
    pub activation: ActivationPanel,
    /// Last activation code typed, cleared after a successful activation.
    pub activation_input: String,
    /// Product form contents, reset after a successful creation.
    pub product_form: ProductForm,
}

struct ControllerInner {
    service: WeevService,
    state: RwLock<AppState>,
    notifications: NotificationCenter,
    loading: LoadingOverlay,
    in_flight: InFlight,
    view_token: Mutex<CancellationToken>,
}

/// Client-side session and view state machine.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("service", &self.inner.service)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Creates a controller in the landing view with no session.
    pub fn new(service: WeevService, config: &ControllerConfig) -> Self {
        let inner = ControllerInner {
            service,
            state: RwLock::new(AppState::default()),
            notifications: NotificationCenter::new(config.toast_ttl(), config.sweep_interval()),
            loading: LoadingOverlay::default(),
            in_flight: InFlight::default(),
            view_token: Mutex::new(CancellationToken::new()),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns a snapshot of the current state.
    pub async fn state(&self) -> AppState {
        self.inner.state.read().await.clone()
    }

    /// Computes the render model for the current state.
    pub async fn screen(&self) -> Screen {
        let state = self.inner.state.read().await;
        Screen::new(
            &state,
            self.inner.notifications.active(),
            self.inner.loading.is_visible(),
        )
    }

    /// Returns the notification queue.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    /// Returns the toasts currently shown.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.notifications.active()
    }

    /// Hides a toast.
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.inner.notifications.dismiss(id)
    }

    /// Starts the toast sweeper.
    pub fn spawn_sweeper(&self, cancel: CancellationToken) -> JoinHandle<()> {
        self.inner.notifications.spawn_sweeper(cancel)
    }

    /// Returns whether the loading overlay is visible.
    pub fn is_loading(&self) -> bool {
        self.inner.loading.is_visible()
    }

    /// Opens a prompt.
    pub async fn open_prompt(&self, prompt: Prompt) {
        self.inner.state.write().await.prompts.open(prompt);
    }

    /// Closes a prompt.
    pub async fn close_prompt(&self, prompt: Prompt) {
        self.inner.state.write().await.prompts.close(prompt);
    }

    /// Establishes the session from the server's cookie state.
    ///
    /// Routes to the dashboard when the server confirms a user, otherwise
    /// to the landing view. Returns the resulting view.
    pub async fn check_auth(&self) -> View {
        let _loading = self.inner.loading.show();
        let service = &self.inner.service;

        let authenticated = match service.check_auth().await {
            Ok(status) => status.authenticated,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Auth check failed"
                );
                false
            }
        };

        if !authenticated {
            self.enter_landing().await;
            return View::Landing;
        }

        match service.current_user().await {
            Ok(user) => self.enter_dashboard(user).await,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Failed to load current user after positive auth check"
                );
                self.enter_landing().await;
                View::Landing
            }
        }
    }

    /// Signs in.
    ///
    /// On failure the session is unchanged and the login prompt stays as it
    /// was.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let _guard = self.inner.in_flight.begin(ActionKind::Login)?;
        let _loading = self.inner.loading.show();

        let request = LoginRequest::new(email, password);
        match self.inner.service.login(&request).await {
            Ok(user) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    user_id = user.id,
                    role = %user.role,
                    "Logged in"
                );
                self.close_prompt(Prompt::Login).await;
                self.inner.notifications.success(messages::LOGIN_SUCCESS);
                self.enter_dashboard(user.clone()).await;
                Ok(user)
            }
            Err(error) => {
                self.notify_failure(&error, messages::LOGIN_FAILED);
                Err(error)
            }
        }
    }

    /// Creates an account and signs in.
    pub async fn register(&self, form: &RegisterForm) -> Result<User> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(error) => {
                self.inner
                    .notifications
                    .warning(error.message.as_deref().unwrap_or(messages::REGISTER_FAILED));
                return Err(error);
            }
        };

        let _guard = self.inner.in_flight.begin(ActionKind::Register)?;
        let _loading = self.inner.loading.show();

        match self.inner.service.register(&request).await {
            Ok(user) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    user_id = user.id,
                    role = %user.role,
                    "Registered"
                );
                self.close_prompt(Prompt::Register).await;
                self.inner.notifications.success(messages::REGISTER_SUCCESS);
                self.enter_dashboard(user.clone()).await;
                Ok(user)
            }
            Err(error) => {
                self.notify_failure(&error, messages::REGISTER_FAILED);
                Err(error)
            }
        }
    }

    /// Ends the session.
    ///
    /// Only valid while authenticated. State changes only on success.
    pub async fn logout(&self) -> Result<()> {
        if !self.inner.state.read().await.session.is_authenticated() {
            return Err(Error::new(ErrorKind::Authentication).with_message(messages::NOT_SIGNED_IN));
        }

        let _guard = self.inner.in_flight.begin(ActionKind::Logout)?;
        let _loading = self.inner.loading.show();

        match self.inner.service.logout().await {
            Ok(()) => {
                tracing::info!(target: TRACING_TARGET, "Logged out");
                self.enter_landing().await;
                self.inner.notifications.success(messages::LOGOUT_SUCCESS);
                Ok(())
            }
            Err(error) => {
                let message = if error.is_connection_failure() {
                    messages::LOGOUT_FAILED
                } else {
                    error.server_message().unwrap_or(messages::LOGOUT_FAILED)
                };
                self.inner.notifications.error(message);
                Err(error)
            }
        }
    }

    /// Activates a product by code.
    ///
    /// The code is trimmed and uppercased; blank input only warns. A call
    /// rejected because an activation is pending leaves the input untouched.
    pub async fn activate_code(&self, raw: &str) -> Result<ActivationSummary> {
        let _guard = self.inner.in_flight.begin(ActionKind::Activate)?;
        self.inner.state.write().await.activation_input = raw.to_owned();

        let Some(code) = ActivationCode::normalize(raw) else {
            self.inner
                .notifications
                .warning(messages::EMPTY_ACTIVATION_CODE);
            return Err(Error::invalid_input().with_message(messages::EMPTY_ACTIVATION_CODE));
        };

        let _loading = self.inner.loading.show();

        match self.inner.service.activate(&code).await {
            Ok(outcome) => {
                let summary = ActivationSummary::from(&outcome);
                tracing::info!(
                    target: TRACING_TARGET,
                    code = %code,
                    points_earned = summary.points_earned,
                    rewards_granted = summary.rewards_granted,
                    "Product activated"
                );

                let is_consumer = {
                    let mut state = self.inner.state.write().await;
                    state.activation = ActivationPanel::Success(summary.clone());
                    state.activation_input.clear();
                    state.session.role().is_some_and(|role| role.is_consumer())
                };
                self.inner
                    .notifications
                    .success(messages::ACTIVATION_SUCCESS);

                if is_consumer {
                    self.refresh_dashboard().await;
                }
                Ok(summary)
            }
            Err(error) => {
                let (inline, toast) = if error.is_connection_failure() {
                    (messages::CONNECTION_ERROR_RETRY, messages::CONNECTION_ERROR)
                } else {
                    let message = error.server_message().unwrap_or(messages::ACTIVATION_FAILED);
                    (message, message)
                };
                self.inner.state.write().await.activation = ActivationPanel::Failure(inline.to_owned());
                self.inner.notifications.error(toast);
                Err(error)
            }
        }
    }

    /// Creates a product.
    ///
    /// On success the prompt closes, the form resets and a brand
    /// administrator's dashboard is fetched once.
    pub async fn create_product(&self, form: ProductForm) -> Result<()> {
        let _guard = self.inner.in_flight.begin(ActionKind::CreateProduct)?;
        let _loading = self.inner.loading.show();

        let product = form.to_new_product();
        self.inner.state.write().await.product_form = form;

        match self.inner.service.create_product(&product).await {
            Ok(created) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    product_id = ?created.product.as_ref().map(|p| p.id),
                    "Product created"
                );

                let is_brand_admin = {
                    let mut state = self.inner.state.write().await;
                    state.prompts.close(Prompt::CreateProduct);
                    state.product_form = ProductForm::default();
                    state.session.role().is_some_and(|role| role.is_brand_admin())
                };
                self.inner.notifications.success(messages::PRODUCT_CREATED);

                if is_brand_admin {
                    self.refresh_dashboard().await;
                }
                Ok(())
            }
            Err(error) => {
                self.notify_failure(&error, messages::PRODUCT_FAILED);
                Err(error)
            }
        }
    }

    /// Claims a granted reward, then refreshes rewards and metrics.
    pub async fn claim_reward(&self, id: i64) -> Result<()> {
        let _guard = self.inner.in_flight.begin(ActionKind::ClaimReward)?;
        let _loading = self.inner.loading.show();

        match self.inner.service.claim_reward(id).await {
            Ok(_) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    reward_id = id,
                    "Reward claimed"
                );
                self.inner.notifications.success(messages::REWARD_CLAIMED);
                self.refresh_dashboard().await;
                Ok(())
            }
            Err(error) => {
                self.notify_failure(&error, messages::CLAIM_FAILED);
                Err(error)
            }
        }
    }

    /// Fetches a fresh dashboard snapshot for the current role.
    ///
    /// Failures leave state untouched and raise no toast. A fetch whose view
    /// was left before it finished is dropped with [`ErrorKind::Cancelled`].
    pub async fn fetch_dashboard(&self) -> Result<()> {
        let role = self.inner.state.read().await.session.role().cloned();
        let Some(role) = role else {
            return Err(Error::new(ErrorKind::Authentication).with_message(messages::NOT_SIGNED_IN));
        };

        let variant = DashboardVariant::for_role(&role);
        if let DashboardVariant::UnsupportedRole(role) = &variant {
            return Err(Error::unsupported_role().with_message(role.clone()));
        }

        let token = self.view_token();
        let fetched = tokio::select! {
            _ = token.cancelled() => Err(Error::cancelled()),
            result = self.load_snapshot(&variant) => result,
        };

        let snapshot = fetched?;
        let mut state = self.inner.state.write().await;
        let still_current = state
            .session
            .role()
            .is_some_and(|current| DashboardVariant::for_role(current) == variant);
        if token.is_cancelled() || !still_current {
            return Err(Error::cancelled());
        }
        state.dashboard = Some(snapshot);
        Ok(())
    }

    /// Lists the consumer's activation history.
    pub async fn activation_history(&self) -> Result<Vec<Activation>> {
        match self.inner.service.my_activations().await {
            Ok(history) => Ok(history.activations),
            Err(error) => {
                self.notify_failure(&error, messages::LOAD_FAILED);
                Err(error)
            }
        }
    }

    /// Lists the categories of active products.
    pub async fn categories(&self) -> Result<Vec<String>> {
        match self.inner.service.categories().await {
            Ok(list) => Ok(list.categories),
            Err(error) => {
                self.notify_failure(&error, messages::LOAD_FAILED);
                Err(error)
            }
        }
    }

    /// Entry point for editing a product; not available yet.
    pub fn edit_product(&self, product_id: i64) {
        tracing::debug!(
            target: TRACING_TARGET,
            product_id,
            "Edit product requested"
        );
        self.inner.notifications.warning(messages::IN_DEVELOPMENT);
    }

    /// Entry point for creating a reward; not available yet.
    pub fn create_reward(&self) {
        self.inner.notifications.warning(messages::IN_DEVELOPMENT);
    }

    async fn load_snapshot(&self, variant: &DashboardVariant) -> Result<DashboardSnapshot> {
        let service = &self.inner.service;
        match variant {
            DashboardVariant::Consumer => {
                let dashboard = service.user_dashboard().await?;
                let rewards = match service.my_rewards(RewardState::Available).await {
                    Ok(list) => list.rewards,
                    Err(error) => {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            error = %error,
                            "Failed to load rewards, keeping previous list"
                        );
                        self.previous_rewards().await
                    }
                };
                Ok(DashboardSnapshot::Consumer { dashboard, rewards })
            }
            DashboardVariant::Brand => {
                let dashboard = service.brand_dashboard().await?;
                Ok(DashboardSnapshot::Brand(dashboard))
            }
            DashboardVariant::UnsupportedRole(role) => {
                Err(Error::unsupported_role().with_message(role.clone()))
            }
        }
    }

    async fn previous_rewards(&self) -> Vec<UserReward> {
        match &self.inner.state.read().await.dashboard {
            Some(DashboardSnapshot::Consumer { rewards, .. }) => rewards.clone(),
            _ => Vec::new(),
        }
    }

    /// Fetches the dashboard, logging instead of reporting failures.
    async fn refresh_dashboard(&self) {
        if let Err(error) = self.fetch_dashboard().await {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                "Dashboard refresh skipped"
            );
        }
    }

    async fn enter_dashboard(&self, user: User) -> View {
        let variant = DashboardVariant::for_role(&user.role);
        let view = View::Dashboard(variant.clone());
        self.reset_view_token();

        {
            let mut state = self.inner.state.write().await;
            state.session = Session::Authenticated(user);
            state.view = view.clone();
            state.dashboard = None;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            variant = ?variant,
            "Entered dashboard"
        );

        match variant {
            DashboardVariant::UnsupportedRole(role) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    role = %role,
                    "Unsupported role, dashboard not loaded"
                );
                self.inner.notifications.warning(messages::UNSUPPORTED_ROLE);
            }
            _ => self.refresh_dashboard().await,
        }

        view
    }

    async fn enter_landing(&self) {
        self.reset_view_token();
        let mut state = self.inner.state.write().await;
        state.session.clear();
        state.view = View::Landing;
        state.prompts.close_all();
        state.dashboard = None;
        state.activation = ActivationPanel::Hidden;
        state.activation_input.clear();
    }

    fn notify_failure(&self, error: &Error, fallback: &'static str) {
        let message = if error.is_connection_failure() {
            messages::CONNECTION_ERROR
        } else {
            error.server_message().unwrap_or(fallback)
        };
        self.inner.notifications.error(message);
    }

    fn view_token(&self) -> CancellationToken {
        self.lock_view_token().clone()
    }

    /// Cancels fetches bound to the current view.
    fn reset_view_token(&self) {
        let mut token = self.lock_view_token();
        token.cancel();
        *token = CancellationToken::new();
    }

    fn lock_view_token(&self) -> MutexGuard<'_, CancellationToken> {
        self.inner
            .view_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
