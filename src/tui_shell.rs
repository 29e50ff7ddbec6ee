use anyhow::Result;

mod app;
mod event_loop;
mod input;
mod render;
mod view;

use app::App;

pub(crate) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
