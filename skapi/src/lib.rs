mod auth;
mod client;
pub mod domain;
mod error;
mod memory;
mod service_url;
mod store;

pub(crate) use service_url::*;

pub use auth::*;
pub use client::*;
pub use domain::*;
pub use error::*;
pub use memory::*;
pub use store::*;
