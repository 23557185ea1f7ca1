//! Row-level access to `health_searches` and `profiles`.

pub mod profile;
pub mod search;

pub use profile::*;
pub use search::*;
