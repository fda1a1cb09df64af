pub mod user;
pub mod commit;
pub mod analysis;

pub use user::*;
pub use commit::*;
pub use analysis::*;
