//! Client-side password gate.
//!
//! The gate only decides whether the content area is shown. The snapshot is
//! held in memory either way, so this is a deterrent and not access control.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::store::TokenStore;

/// Storage key for the last access hash that was matched successfully.
pub const UNLOCK_TOKEN_KEY: &str = "newsdesk.access_hash";

/// One-way digest shared with the snapshot producer.
pub trait PasswordDigest {
    fn digest(&self, candidate: &str) -> String;
}

/// SHA-256 over the UTF-8 bytes, lowercase hex.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl PasswordDigest for Sha256Digest {
    fn digest(&self, candidate: &str) -> String {
        hex::encode(Sha256::digest(candidate.as_bytes()))
    }
}

pub fn digest_password(candidate: &str) -> String {
    Sha256Digest.digest(candidate)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMessage {
    EnterPassword,
    WrongPassword,
}

impl fmt::Display for GateMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateMessage::EnterPassword => f.write_str("Enter a password."),
            GateMessage::WrongPassword => f.write_str("Wrong password."),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    AlreadyUnlocked,
    Empty,
    Mismatch,
}

#[derive(Clone, Debug)]
pub struct AccessGate {
    state: GateState,
    access_hash: String,
    message: Option<GateMessage>,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self {
            state: GateState::Unlocked,
            access_hash: String::new(),
            message: None,
        }
    }
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == GateState::Locked
    }

    pub fn message(&self) -> Option<GateMessage> {
        self.message
    }

    /// Re-derive the lock state for a freshly fetched snapshot.
    pub fn evaluate(&mut self, snapshot_hash: Option<&str>, stored_token: Option<&str>) {
        let hash = snapshot_hash.unwrap_or("");
        self.access_hash = hash.to_string();
        self.message = None;
        self.state = if hash.is_empty() || stored_token == Some(hash) {
            GateState::Unlocked
        } else {
            GateState::Locked
        };
        tracing::debug!(state = ?self.state, has_hash = !hash.is_empty(), "gate evaluated");
    }

    /// Like [`AccessGate::evaluate`], reading the stored token from `store`.
    pub fn evaluate_with_store(&mut self, snapshot_hash: Option<&str>, store: &dyn TokenStore) {
        let stored = match store.get(UNLOCK_TOKEN_KEY) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!("read unlock token: {:#}", err);
                None
            }
        };
        self.evaluate(snapshot_hash, stored.as_deref());
    }

    pub fn try_unlock(&mut self, candidate: &str, store: &mut dyn TokenStore) -> UnlockOutcome {
        self.try_unlock_with(candidate, &Sha256Digest, store)
    }

    pub fn try_unlock_with(
        &mut self,
        candidate: &str,
        digest: &dyn PasswordDigest,
        store: &mut dyn TokenStore,
    ) -> UnlockOutcome {
        if !self.is_locked() {
            return UnlockOutcome::AlreadyUnlocked;
        }

        // Hashed exactly as typed: the producer digests the raw password bytes.
        if candidate.is_empty() {
            self.message = Some(GateMessage::EnterPassword);
            return UnlockOutcome::Empty;
        }

        if digest.digest(candidate) != self.access_hash {
            self.message = Some(GateMessage::WrongPassword);
            tracing::info!("gate unlock rejected");
            return UnlockOutcome::Mismatch;
        }

        if let Err(err) = store.set(UNLOCK_TOKEN_KEY, &self.access_hash) {
            tracing::warn!("persist unlock token: {:#}", err);
        }
        self.state = GateState::Unlocked;
        self.message = None;
        tracing::info!("gate unlocked");
        UnlockOutcome::Unlocked
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
