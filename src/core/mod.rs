pub mod amount;
pub mod environment;
pub mod error;
pub mod telemetry;

pub use environment::Environment;
pub use error::{GatewayError, Result};
pub use telemetry::{init_tracing, LogFormat};
