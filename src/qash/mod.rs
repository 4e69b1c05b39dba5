pub mod builder;
pub mod cbs;
pub mod client;
pub mod datasets;
pub mod rest;

pub use builder::{build_client_from_env, QashBuilder};
pub use cbs::Cbs;
pub use client::QashClient;
pub use datasets::Datasets;
pub use rest::QashRest;
