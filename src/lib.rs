pub mod activation;
pub mod config;
pub mod error;
pub mod mnist;
pub mod rbm;

pub use config::TrainConfig;
pub use error::{InvalidArgument, RbmError, Result};
pub use rbm::{Rbm, TrainReport, DEFAULT_GIBBS_STEPS};
