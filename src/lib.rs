pub mod config;
pub mod filter;
pub mod gate;
pub mod logging;
pub mod model;
pub mod paint;
pub mod refresh;
pub mod render;
pub mod source;
pub mod store;
pub mod tui;

mod tui_shell;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
