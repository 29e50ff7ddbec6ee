use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::source::SnapshotSource;

pub struct TuiRunOptions {
    pub source: Arc<dyn SnapshotSource>,
    pub state_path: PathBuf,
    pub show_summaries: bool,
    pub auto_refresh: Option<Duration>,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}
