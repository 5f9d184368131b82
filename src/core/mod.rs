pub mod attributes;
pub mod client;
pub mod export;
pub mod flatten;
pub mod resolver;
pub mod selector;

pub use client::OktaClient;
pub use export::{export_group_members, export_to_file, PAGE_LIMIT};
