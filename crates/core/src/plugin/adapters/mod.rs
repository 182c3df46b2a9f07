//! Built-in capability adapters.

mod cloud;
mod local;

pub use cloud::{CloudinaryAdapter, S3Adapter};
pub use local::LocalFsAdapter;
