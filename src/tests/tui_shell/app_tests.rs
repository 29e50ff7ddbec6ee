use std::sync::Mutex;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::gate::{UNLOCK_TOKEN_KEY, digest_password};
use crate::model::SourceGroup;
use crate::refresh::RefreshStatus;
use crate::store::MemoryTokenStore;
use crate::test_support::titled;

use super::event_loop::handle_key;

struct FixedSource {
    result: Mutex<Result<Snapshot, FetchError>>,
}

impl FixedSource {
    fn new(result: Result<Snapshot, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(result),
        })
    }
}

impl SnapshotSource for FixedSource {
    fn fetch(&self) -> Result<Snapshot, FetchError> {
        self.result.lock().unwrap().clone()
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

fn digest(access_hash: Option<String>) -> Snapshot {
    Snapshot {
        generated_at: Some("2024-01-01T00:00:00Z".to_string()),
        sources: vec![
            SourceGroup {
                source: Some("A".to_string()),
                source_url: None,
                items: vec![titled("Iran talks"), titled("Markets")],
            },
            SourceGroup {
                source: Some("B".to_string()),
                source_url: None,
                items: vec![titled("Weather")],
            },
        ],
        iran: vec![],
        access_hash,
    }
}

fn settle(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if app.drain_results() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("refresh did not complete");
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, c: char) {
    handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn background_refresh_lands_on_drain() {
    let mut app = App::new(
        FixedSource::new(Ok(digest(None))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    assert_eq!(app.source_label(), "fixed");

    app.refresh();
    assert_eq!(app.desk.status(), &RefreshStatus::Loading);
    settle(&mut app);
    assert_eq!(app.desk.status(), &RefreshStatus::Updated);
    assert_eq!(app.desk.page().digest.body.sections().len(), 2);
}

#[test]
fn failed_refresh_reports_error() {
    let mut app = App::new(
        FixedSource::new(Err(FetchError::Status(500))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    app.refresh();
    settle(&mut app);
    assert_eq!(
        app.desk.status(),
        &RefreshStatus::Failed(FetchError::Status(500))
    );
    assert!(app.desk.snapshot().is_none());
}

#[test]
fn typing_filters_and_escape_clears_then_quits() {
    let mut app = App::new(
        FixedSource::new(Ok(digest(None))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    app.refresh();
    settle(&mut app);

    type_str(&mut app, "IRAN");
    assert_eq!(app.desk.query().as_str(), "iran");
    let page = app.desk.page();
    assert_eq!(page.digest.body.sections().len(), 1);
    assert_eq!(page.digest.body.sections()[0].item_count, 1);

    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.desk.query().as_str(), "ira");

    press(&mut app, KeyCode::Esc);
    assert!(app.filter.buf.is_empty());
    assert!(!app.desk.query().is_active());
    assert!(!app.quit);

    press(&mut app, KeyCode::Esc);
    assert!(app.quit);
}

#[test]
fn summary_toggle_and_scroll_keys() {
    let mut app = App::new(
        FixedSource::new(Ok(digest(None))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    assert!(!app.desk.show_summaries());
    ctrl(&mut app, 's');
    assert!(app.desk.show_summaries());
    press(&mut app, KeyCode::F(2));
    assert!(!app.desk.show_summaries());

    press(&mut app, KeyCode::PageDown);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.scroll, 11);
    press(&mut app, KeyCode::PageUp);
    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.scroll, 0);
}

#[test]
fn locked_digest_takes_password_keys() {
    let hash = digest_password("letmein");
    let mut app = App::new(
        FixedSource::new(Ok(digest(Some(hash.clone())))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    app.refresh();
    settle(&mut app);
    assert!(app.desk.gate().is_locked());

    // Characters go to the password field, not the filter.
    type_str(&mut app, "nope");
    assert!(app.filter.buf.is_empty());
    assert_eq!(app.password.masked(), "****");
    press(&mut app, KeyCode::Enter);
    assert!(app.desk.gate().is_locked());
    assert_eq!(
        app.desk.page().gate.message.as_deref(),
        Some("Wrong password.")
    );
    assert!(app.password.buf.is_empty());

    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.desk.page().gate.message.as_deref(),
        Some("Enter a password.")
    );

    type_str(&mut app, "letmein");
    press(&mut app, KeyCode::Enter);
    assert!(!app.desk.gate().is_locked());
    assert_eq!(
        app.store.get(UNLOCK_TOKEN_KEY).unwrap().as_deref(),
        Some(hash.as_str())
    );

    // Re-fetching the same digest stays unlocked thanks to the stored token.
    ctrl(&mut app, 'r');
    settle(&mut app);
    assert!(!app.desk.gate().is_locked());
}

#[test]
fn auto_refresh_due_only_when_configured() {
    let app = App::new(
        FixedSource::new(Ok(digest(None))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    assert!(!app.auto_refresh_due());

    let app = App::new(
        FixedSource::new(Ok(digest(None))),
        Box::new(MemoryTokenStore::default()),
        Some(Duration::ZERO),
    );
    assert!(app.auto_refresh_due());
}

#[test]
fn ctrl_c_quits_even_when_locked() {
    let mut app = App::new(
        FixedSource::new(Ok(digest(Some(digest_password("x"))))),
        Box::new(MemoryTokenStore::default()),
        None,
    );
    app.refresh();
    settle(&mut app);
    ctrl(&mut app, 'c');
    assert!(app.quit);
}
