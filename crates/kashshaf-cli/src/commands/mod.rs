//! Command implementations.

pub mod analyze;
pub mod models;
pub mod profile;
pub mod template;

pub use self::analyze::execute_analyze;
pub use self::models::execute_models;
pub use self::profile::execute_profile;
pub use self::template::execute_template;
