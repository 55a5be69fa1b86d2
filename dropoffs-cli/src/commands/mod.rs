pub mod check;
pub mod nearby;
pub mod serve;

pub use check::run_check;
pub use nearby::run_nearby;
pub use serve::run_serve;
