pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{run, ExportSummary};
pub use config::{CliArgs, ExportConfig};
pub use core::client::OktaClient;
pub use domain::{DirectoryApi, Group, Member, MemberPage};
pub use utils::error::{ExportError, Result};
