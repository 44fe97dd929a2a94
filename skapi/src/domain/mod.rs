mod query;
mod record;

pub use query::*;
pub use record::*;
