pub mod model;
pub mod ports;

pub use model::{Group, GroupResource, Member, MemberPage};
pub use ports::DirectoryApi;
