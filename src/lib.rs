pub mod core;
pub mod qash;
pub mod utils;

pub use crate::core::{
    config::{ConfigError, QashConfig, QashEnvironment},
    errors::QashError,
    traits::{CoreBanking, DatasetSource, PartnerDirectory},
    types::*,
};
pub use qash::{Cbs, Datasets, QashBuilder, QashClient};
