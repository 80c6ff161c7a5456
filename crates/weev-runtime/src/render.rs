//! Declarative render model.
//!
//! Front ends bind to [`Screen`], which is computed from an immutable
//! snapshot of controller state. Every list carries the message shown when
//! it is empty.

use jiff::civil::DateTime;
use weev_core::types::{
    Activation, ActivationOutcome, BrandDashboard, ConsumerDashboard, DashboardSnapshot,
    UserReward,
};

use crate::controller::AppState;
use crate::messages;
use crate::notification::Toast;
use crate::view::{DashboardVariant, NavState, Prompts, View};

/// A list together with its empty-state message.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub empty_message: &'static str,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>, empty_message: &'static str) -> Self {
        Self {
            items,
            empty_message,
        }
    }

    /// Returns the message to show instead of the items, if there are none.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.items.is_empty().then_some(self.empty_message)
    }
}

/// A consumer's activation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRow {
    pub product_name: String,
    pub brand: String,
    pub points: i64,
    pub date: String,
}

impl From<&Activation> for ActivationRow {
    fn from(activation: &Activation) -> Self {
        let product = activation.product.as_ref();
        Self {
            product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
            brand: product.and_then(|p| p.brand.clone()).unwrap_or_default(),
            points: activation.points_earned,
            date: format_date(activation.activated_at),
        }
    }
}

/// A claimable reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardCard {
    /// Reward-instance id to pass to `claim_reward`.
    pub id: i64,
    pub name: String,
    pub description: String,
    pub value: String,
}

impl From<&UserReward> for RewardCard {
    fn from(user_reward: &UserReward) -> Self {
        let reward = user_reward.reward.as_ref();
        Self {
            id: user_reward.id,
            name: reward.map(|r| r.name.clone()).unwrap_or_default(),
            description: reward.and_then(|r| r.description.clone()).unwrap_or_default(),
            value: reward.and_then(|r| r.value.clone()).unwrap_or_default(),
        }
    }
}

/// Consumer dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumerPanel {
    pub total_points: i64,
    pub level: i64,
    pub total_activations: i64,
    pub activations: Listing<ActivationRow>,
    pub rewards: Listing<RewardCard>,
}

impl ConsumerPanel {
    pub fn new(dashboard: &ConsumerDashboard, rewards: &[UserReward]) -> Self {
        Self {
            total_points: dashboard.metrics.total_points,
            level: dashboard.metrics.level,
            total_activations: dashboard.metrics.total_activations,
            activations: Listing::new(
                dashboard
                    .recent_activations
                    .iter()
                    .map(ActivationRow::from)
                    .collect(),
                messages::NO_RECENT_ACTIVATIONS,
            ),
            rewards: Listing::new(
                rewards.iter().map(RewardCard::from).collect(),
                messages::NO_AVAILABLE_REWARDS,
            ),
        }
    }
}

/// A product ranked by activations, with its edit entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub activations: i64,
}

/// A recent activation of one of the brand's products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandActivationRow {
    pub product_name: String,
    pub user_name: String,
    pub points: i64,
    pub date: String,
}

/// Brand dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandPanel {
    pub total_products: i64,
    pub active_products: i64,
    pub total_activations: i64,
    pub unique_users: i64,
    pub products: Listing<ProductRow>,
    pub activations: Listing<BrandActivationRow>,
}

impl From<&BrandDashboard> for BrandPanel {
    fn from(dashboard: &BrandDashboard) -> Self {
        let metrics = &dashboard.metrics;
        Self {
            total_products: metrics.total_products,
            active_products: metrics.active_products,
            total_activations: metrics.total_activations,
            unique_users: metrics.unique_users,
            products: Listing::new(
                dashboard
                    .top_products
                    .iter()
                    .map(|p| ProductRow {
                        id: p.id,
                        name: p.name.clone(),
                        activations: p.activations,
                    })
                    .collect(),
                messages::NO_PRODUCTS,
            ),
            activations: Listing::new(
                dashboard
                    .recent_activations
                    .iter()
                    .map(|a| BrandActivationRow {
                        product_name: a.product_name.clone(),
                        user_name: a.user_name.clone(),
                        points: a.points_earned,
                        date: format_date(a.activated_at),
                    })
                    .collect(),
                messages::NO_BRAND_ACTIVATIONS,
            ),
        }
    }
}

/// What the dashboard area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardPanel {
    /// No snapshot has arrived yet for this view.
    Loading,
    Consumer(ConsumerPanel),
    Brand(BrandPanel),
    /// The role cannot be rendered.
    UnsupportedRole(String),
}

impl DashboardPanel {
    /// Builds the panel for a variant from the current snapshot.
    pub fn new(variant: &DashboardVariant, snapshot: Option<&DashboardSnapshot>) -> Self {
        match (variant, snapshot) {
            (DashboardVariant::UnsupportedRole(role), _) => Self::UnsupportedRole(role.clone()),
            (
                DashboardVariant::Consumer,
                Some(DashboardSnapshot::Consumer { dashboard, rewards }),
            ) => Self::Consumer(ConsumerPanel::new(dashboard, rewards)),
            (DashboardVariant::Brand, Some(DashboardSnapshot::Brand(dashboard))) => {
                Self::Brand(BrandPanel::from(dashboard))
            }
            _ => Self::Loading,
        }
    }
}

/// Summary of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationSummary {
    pub product_name: String,
    pub points_earned: i64,
    pub total_points: i64,
    pub level: i64,
    /// Number of rewards granted; not shown when zero.
    pub rewards_granted: usize,
}

impl From<&ActivationOutcome> for ActivationSummary {
    fn from(outcome: &ActivationOutcome) -> Self {
        Self {
            product_name: outcome
                .activation
                .product_name()
                .unwrap_or_default()
                .to_owned(),
            points_earned: outcome.points_earned,
            total_points: outcome.total_points,
            level: outcome.level,
            rewards_granted: outcome.rewards_granted.len(),
        }
    }
}

/// Inline result panel under the activation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActivationPanel {
    #[default]
    Hidden,
    Success(ActivationSummary),
    Failure(String),
}

/// Everything a front end needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub nav: NavState,
    pub view: View,
    pub prompts: Prompts,
    pub dashboard: Option<DashboardPanel>,
    pub activation: ActivationPanel,
    pub toasts: Vec<Toast>,
    pub loading: bool,
}

impl Screen {
    /// Computes the screen for a state snapshot.
    pub fn new(state: &AppState, toasts: Vec<Toast>, loading: bool) -> Self {
        let dashboard = state
            .view
            .variant()
            .map(|variant| DashboardPanel::new(variant, state.dashboard.as_ref()));

        Self {
            nav: NavState::from(&state.session),
            view: state.view.clone(),
            prompts: state.prompts,
            dashboard,
            activation: state.activation.clone(),
            toasts,
            loading,
        }
    }
}

/// Formats a timestamp as a day/month/year date.
pub fn format_date(date: Option<DateTime>) -> String {
    date.map(|d| d.strftime("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use weev_core::types::{BrandMetrics, ConsumerMetrics};

    use super::*;

    fn empty_consumer() -> ConsumerDashboard {
        ConsumerDashboard {
            user: None,
            metrics: ConsumerMetrics::default(),
            recent_activations: Vec::new(),
            recent_rewards: Vec::new(),
            favorite_brands: Vec::new(),
            monthly_activations: Vec::new(),
        }
    }

    #[test]
    fn empty_lists_show_messages() {
        let panel = ConsumerPanel::new(&empty_consumer(), &[]);
        assert_eq!(
            panel.activations.placeholder(),
            Some("No tienes activaciones recientes.")
        );
        assert_eq!(
            panel.rewards.placeholder(),
            Some("No tienes recompensas disponibles.")
        );

        let brand = BrandPanel::from(&BrandDashboard {
            brand: None,
            metrics: BrandMetrics::default(),
            top_products: Vec::new(),
            daily_activations: Vec::new(),
            recent_activations: Vec::new(),
        });
        assert_eq!(brand.products.placeholder(), Some("No tienes productos creados."));
        assert_eq!(
            brand.activations.placeholder(),
            Some("No hay activaciones recientes.")
        );
    }

    #[test]
    fn panel_waits_for_matching_snapshot() {
        let snapshot = DashboardSnapshot::Consumer {
            dashboard: empty_consumer(),
            rewards: Vec::new(),
        };

        assert!(matches!(
            DashboardPanel::new(&DashboardVariant::Consumer, Some(&snapshot)),
            DashboardPanel::Consumer(_)
        ));
        assert_eq!(
            DashboardPanel::new(&DashboardVariant::Brand, Some(&snapshot)),
            DashboardPanel::Loading
        );
        assert_eq!(
            DashboardPanel::new(&DashboardVariant::UnsupportedRole("x".into()), None),
            DashboardPanel::UnsupportedRole("x".into())
        );
    }

    #[test]
    fn dates_are_day_first() {
        let date: DateTime = "2024-05-03T09:30:00".parse().unwrap();
        assert_eq!(format_date(Some(date)), "03/05/2024");
        assert_eq!(format_date(None), "");
    }
}
