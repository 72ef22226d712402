pub mod client;
pub mod runner;

pub use crate::domain::ports::{ConfigProvider, PageController, Storage};
pub use crate::utils::error::Result;
