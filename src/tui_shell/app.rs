use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::gate::UnlockOutcome;
use crate::model::Snapshot;
use crate::refresh::{Desk, RefreshTicket};
use crate::source::{FetchError, SnapshotSource};
use crate::store::{FileTokenStore, TokenStore};
use crate::tui::TuiRunOptions;

use super::event_loop;
use super::input::Input;

type FetchResult = (RefreshTicket, Result<Snapshot, FetchError>);

pub(super) fn run(opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let store = FileTokenStore::new(opts.state_path.clone());
    let mut app = App::new(opts.source, Box::new(store), opts.auto_refresh);
    app.desk.set_show_summaries(opts.show_summaries);
    app.refresh();

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

pub(super) struct App {
    pub(super) desk: Desk,
    store: Box<dyn TokenStore>,
    source: Arc<dyn SnapshotSource>,
    source_label: String,

    results_tx: Sender<FetchResult>,
    results_rx: Receiver<FetchResult>,

    auto_refresh: Option<Duration>,
    last_refresh: Instant,

    pub(super) filter: Input,
    pub(super) password: Input,
    pub(super) scroll: u16,

    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(
        source: Arc<dyn SnapshotSource>,
        store: Box<dyn TokenStore>,
        auto_refresh: Option<Duration>,
    ) -> Self {
        let (results_tx, results_rx) = unbounded();
        Self {
            desk: Desk::new(),
            store,
            source_label: source.describe(),
            source,
            results_tx,
            results_rx,
            auto_refresh,
            last_refresh: Instant::now(),
            filter: Input::default(),
            password: Input::default(),
            scroll: 0,
            quit: false,
        }
    }

    pub(super) fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Issue a refresh; the fetch runs off the UI thread.
    pub(super) fn refresh(&mut self) {
        let ticket = self.desk.begin_refresh();
        self.last_refresh = Instant::now();
        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        std::thread::spawn(move || {
            let result = source.fetch();
            let _ = tx.send((ticket, result));
        });
    }

    /// Apply finished fetches. Returns true if anything arrived.
    pub(super) fn drain_results(&mut self) -> bool {
        let mut any = false;
        while let Ok((ticket, result)) = self.results_rx.try_recv() {
            self.desk
                .complete_refresh(ticket, result, self.store.as_ref());
            any = true;
        }
        if any {
            self.scroll = 0;
        }
        any
    }

    pub(super) fn auto_refresh_due(&self) -> bool {
        self.auto_refresh
            .is_some_and(|every| self.last_refresh.elapsed() >= every)
    }

    pub(super) fn apply_filter(&mut self) {
        self.desk.set_query(&self.filter.buf);
        self.scroll = 0;
    }

    pub(super) fn toggle_summaries(&mut self) {
        self.desk.toggle_summaries();
    }

    pub(super) fn submit_password(&mut self) -> UnlockOutcome {
        let candidate = self.password.take();
        self.desk.try_unlock(&candidate, self.store.as_mut())
    }

    pub(super) fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).max(0);
        self.scroll = next.min(u16::MAX as i32) as u16;
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
