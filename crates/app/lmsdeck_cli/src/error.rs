use thiserror::Error;

use lmsdeck_core::api::ApiError;
use lmsdeck_core::config::ConfigError;
use lmsdeck_core::integration::IntegrationError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Json: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("{}", .0)]
    Config(#[from] ConfigError),

    #[error("{}", .0)]
    Api(#[from] ApiError),

    #[error("{}", .0)]
    Integration(#[from] IntegrationError),
}
