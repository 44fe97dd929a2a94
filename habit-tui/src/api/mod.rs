mod dev_backend;

pub use dev_backend::{dev_store, DEV_EMAIL};
