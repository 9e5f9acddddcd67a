pub mod blogs;
pub mod dispatch;
pub mod edit;
pub mod list;
pub mod sections;
