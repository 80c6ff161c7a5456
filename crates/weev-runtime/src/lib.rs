#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
pub mod controller;
pub mod forms;
pub mod inflight;
pub mod loading;
pub mod messages;
pub mod notification;
pub mod render;
pub mod view;

pub use config::{ControllerConfig, DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TOAST_TTL_SECS};
pub use controller::{AppState, Controller, TRACING_TARGET};
pub use forms::{ProductForm, RegisterForm};
pub use notification::{NotificationCenter, Severity, Toast};
pub use render::{ActivationPanel, ActivationSummary, DashboardPanel, Screen};
pub use view::{DashboardVariant, NavState, Prompt, Prompts, View};
