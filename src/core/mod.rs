//! Process state shared by the server and the Ctrl+C handler.

mod state;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
