#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod endpoint;
pub mod error;
pub mod provider;
mod service;
pub mod types;

pub use endpoint::{Endpoint, Method};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use provider::{ApiRequest, ApiResponse, WeevProvider};
pub use service::{TRACING_TARGET, WeevService};
