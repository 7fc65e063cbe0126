pub mod dispatcher;
pub mod handlers;
pub mod output;

pub use dispatcher::{Dispatcher, SESSION_LOG_TARGET, ShellStores};
pub use handlers::HandlerOptions;
pub use output::{CommandOutput, Flow};
