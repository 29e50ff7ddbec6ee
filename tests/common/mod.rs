use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct ServerGuard {
    pub base_url: String,
    pub data_file: PathBuf,
    dir: tempfile::TempDir,
    child: Child,
}

impl ServerGuard {
    pub fn snapshot_url(&self) -> String {
        format!("{}/data.json", self.base_url)
    }

    /// Replace the served snapshot; picked up by the next request.
    pub fn publish(&self, json: &str) -> Result<()> {
        let tmp = self.dir.path().join("data.json.tmp");
        std::fs::write(&tmp, json).context("write snapshot tmp")?;
        std::fs::rename(&tmp, &self.data_file).context("publish snapshot")?;
        Ok(())
    }

    #[allow(dead_code)]
    pub fn unpublish(&self) -> Result<()> {
        std::fs::remove_file(&self.data_file).context("remove snapshot")
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start `newsdesk-serve` on an ephemeral port with no snapshot published yet.
pub fn spawn_server() -> Result<ServerGuard> {
    let dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = dir.path().join("addr.txt");
    let data_file = dir.path().join("data.json");

    let child = Command::new(env!("CARGO_BIN_EXE_newsdesk-serve"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--data-file",
            data_file.to_str().unwrap(),
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn newsdesk-serve")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        data_file,
        dir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// Run the `newsdesk` CLI with an isolated config and token store under `home`.
#[allow(dead_code)]
pub fn run_newsdesk(home: &Path, args: &[&str]) -> Result<Output> {
    let config = home.join("config.json");
    if !config.exists() {
        std::fs::write(&config, br#"{"version": 1}"#).context("write test config")?;
    }
    let state = home.join("state.json");

    Command::new(env!("CARGO_BIN_EXE_newsdesk"))
        .arg("--config")
        .arg(&config)
        .arg("--state")
        .arg(&state)
        .args(args)
        .env("NEWSDESK_LOG", "off")
        .output()
        .with_context(|| format!("run newsdesk {:?}", args))
}

#[allow(dead_code)]
pub fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[allow(dead_code)]
pub const EXAMPLE_SNAPSHOT: &str = r#"{
    "generated_at": "2024-01-01T00:00:00Z",
    "sources": [{"source": "A", "items": [{"title": "X"}]}],
    "iran": [],
    "access_hash": ""
}"#;
