//! Wire-compatible domain types.
//!
//! Field names follow the API's Spanish wire names through serde renames;
//! the Rust side uses English identifiers.

mod activation;
mod dashboard;
mod product;
mod request;
mod reward;
mod session;
mod user;

pub use activation::{Activation, ActivationCode, ActivationHistory, ActivationOutcome};
pub use dashboard::{
    Brand, BrandActivation, BrandDashboard, BrandMetrics, ConsumerDashboard, ConsumerMetrics,
    DailyActivations, DashboardSnapshot, FavoriteBrand, MonthlyActivations, TopProduct,
};
pub use product::{CategoryList, NewProduct, Product, ProductEnvelope};
pub use request::{ActivateRequest, LoginRequest, RegisterRequest};
pub use reward::{ClaimReceipt, Reward, RewardList, RewardState, UserReward};
pub use session::Session;
pub use user::{AuthStatus, User, UserEnvelope, UserRole};
