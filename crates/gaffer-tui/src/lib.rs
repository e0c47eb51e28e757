// Library root: exposes the client modules to the binary and to
// integration tests.

pub mod app;
pub mod config;
pub mod protocol;
pub mod squad_import;
pub mod tui;
