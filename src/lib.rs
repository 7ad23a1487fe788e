pub mod coordinator;
pub mod error;
pub mod logging;
#[cfg(feature = "lua")]
pub mod lua;
pub mod method;
pub mod settings;

pub use coordinator::Coordinator;
pub use error::AppError;
pub use mazecore;
