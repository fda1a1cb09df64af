pub mod portfolio;
pub mod readme;

pub use portfolio::build_enhancement;
pub use readme::enhance_readme;
