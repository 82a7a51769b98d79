//! Single-use store for pending trade confirmations. A confirm turn
//! deposits the payload under a random token; the execute turn takes
//! it back exactly once. Replayed, unknown or expired tokens yield
//! nothing, which makes execute at-most-once per confirmation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::models::PendingConfirmation;

const TOKEN_TTL: Duration = Duration::from_secs(120);
const TOKEN_LEN: usize = 24;

struct Entry {
    confirmation: PendingConfirmation,
    expires_at: Instant,
}

#[derive(Clone, Default)]
pub struct PendingStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

fn new_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

impl PendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a confirmation and hand back its token. Expired entries
    /// from abandoned confirmations are dropped on the way in.
    pub fn put(&self, confirmation: PendingConfirmation) -> String {
        self.put_with_ttl(confirmation, TOKEN_TTL)
    }

    pub fn put_with_ttl(&self, confirmation: PendingConfirmation, ttl: Duration) -> String {
        let token = new_token();
        let now = Instant::now();

        let mut map = self.inner.lock().unwrap();
        map.retain(|_, e| e.expires_at > now);
        map.insert(
            token.clone(),
            Entry {
                confirmation,
                expires_at: now + ttl,
            },
        );
        token
    }

    /// Consume a token. Returns `None` for unknown, already-used or
    /// expired tokens.
    pub fn take(&self, token: &str) -> Option<PendingConfirmation> {
        let mut map = self.inner.lock().unwrap();
        let entry = map.remove(token)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.confirmation)
    }
}
