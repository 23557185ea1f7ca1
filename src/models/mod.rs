pub mod conversation;
pub mod enums;
pub mod profile;
pub mod search;

pub use conversation::*;
pub use enums::*;
pub use profile::*;
pub use search::*;
