//! In-process session store.
//!
//! Maps an opaque client-held token to the authenticated identity. Tokens
//! are random and server-side, so no signing secret is involved; the client
//! cookie carries nothing but the token itself.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which dashboard and mutation scopes an identity gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Driver,
    Organization,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Driver => "driver",
            Role::Organization => "organization",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity record attached to a request after the access gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub role: Role,
    pub name: String,
}

struct Entry {
    identity: Identity,
    expires_at: Instant,
}

/// Process-wide token -> identity table with create/read/destroy lifecycle.
pub struct SessionStore {
    entries: DashMap<String, Entry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Establish a session for an authenticated identity and hand back the
    /// opaque token the client will present on later requests.
    pub fn login(&self, identity: Identity) -> String {
        let token = generate_token();
        self.entries.insert(
            token.clone(),
            Entry {
                identity,
                expires_at: Instant::now() + self.ttl,
            },
        );
        token
    }

    /// Resolve a token to its identity. Expired entries are evicted on read.
    pub fn current(&self, token: &str) -> Option<Identity> {
        let entry = self.entries.get(token)?;
        if entry.expires_at <= Instant::now() {
            drop(entry);
            self.entries.remove(token);
            return None;
        }
        Some(entry.identity.clone())
    }

    pub fn destroy(&self, token: &str) {
        self.entries.remove(token);
    }
}

/// Generate a random token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}
