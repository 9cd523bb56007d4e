use crate::core::error::StoreError;
use crate::models::issue::Issue;
use crate::models::message::Message;
use crate::models::rating::Rating;
use crate::models::user::User;
use crate::stores::backend::{Backend, MemoryBackend};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Message threads keyed by issue id
pub type Threads = BTreeMap<u64, Vec<Message>>;

/// Logical names of the persisted documents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Users,
    Issues,
    Ratings,
    Messages,
    AdminEmails,
    CurrentUser,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Users => "users",
            StoreKey::Issues => "issues",
            StoreKey::Ratings => "ratings",
            StoreKey::Messages => "messages",
            StoreKey::AdminEmails => "adminEmails",
            StoreKey::CurrentUser => "currentUser",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed JSON documents over a raw backend.
///
/// Each collection has two loaders. The plain one (`users()`, ...) never
/// fails and is meant for views: a missing, unreadable or malformed document
/// yields the key's default. The `try_` one is for read-modify-write paths:
/// a backend read failure is returned instead of a default, so a transient
/// I/O error can never be saved back over the stored document. Malformed
/// data still degrades to the default in both, and undecodable records
/// inside a collection are skipped.
pub struct Store {
    backend: Box<dyn Backend>,
    bootstrap_admin: String,
}

impl Store {
    pub fn new(backend: impl Backend + 'static, bootstrap_admin: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            bootstrap_admin: bootstrap_admin.into(),
        }
    }

    /// Ephemeral store backed by process memory
    pub fn in_memory(bootstrap_admin: impl Into<String>) -> Self {
        Self::new(MemoryBackend::new(), bootstrap_admin)
    }

    /// Admin email seeded whenever the allow-list is absent or unusable
    pub fn bootstrap_admin(&self) -> &str {
        &self.bootstrap_admin
    }

    /// Stored bytes for a key, exactly as persisted
    pub fn raw(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        self.backend.read(key.as_str())
    }

    /// Load and decode one document; `Ok(None)` when missing or corrupt
    pub fn try_load<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        let Some(bytes) = self.backend.read(key.as_str())? else {
            debug!(key = %key, "No stored document, using default");
            return Ok(None);
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored document is corrupt, using default");
                Ok(None)
            }
        }
    }

    /// Like `try_load`, but an unreadable document also yields `None`
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        self.try_load(key).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "Failed to read stored document, using default");
            None
        })
    }

    /// Serialize and persist one document
    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.write(key.as_str(), &bytes)
    }

    fn try_records<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Vec<T>, StoreError> {
        Ok(self
            .try_load::<Vec<Value>>(key)?
            .map(|values| decode_records(key, values))
            .unwrap_or_default())
    }

    fn records<T: DeserializeOwned>(&self, key: StoreKey) -> Vec<T> {
        self.try_records(key).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "Failed to read stored document, using default");
            Vec::new()
        })
    }

    pub fn users(&self) -> Vec<User> {
        self.records(StoreKey::Users)
    }

    pub fn try_users(&self) -> Result<Vec<User>, StoreError> {
        self.try_records(StoreKey::Users)
    }

    pub fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.save(StoreKey::Users, users)
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.records(StoreKey::Issues)
    }

    pub fn try_issues(&self) -> Result<Vec<Issue>, StoreError> {
        self.try_records(StoreKey::Issues)
    }

    pub fn save_issues(&self, issues: &[Issue]) -> Result<(), StoreError> {
        self.save(StoreKey::Issues, issues)
    }

    pub fn ratings(&self) -> Vec<Rating> {
        self.records(StoreKey::Ratings)
    }

    pub fn try_ratings(&self) -> Result<Vec<Rating>, StoreError> {
        self.try_records(StoreKey::Ratings)
    }

    pub fn save_ratings(&self, ratings: &[Rating]) -> Result<(), StoreError> {
        self.save(StoreKey::Ratings, ratings)
    }

    pub fn threads(&self) -> Threads {
        self.try_threads().unwrap_or_else(|e| {
            warn!(key = %StoreKey::Messages, error = %e, "Failed to read stored document, using default");
            Threads::new()
        })
    }

    /// Threads with an unusable key or a non-array body are skipped one by one
    pub fn try_threads(&self) -> Result<Threads, StoreError> {
        let Some(raw) = self.try_load::<BTreeMap<String, Value>>(StoreKey::Messages)? else {
            return Ok(Threads::new());
        };

        let mut threads = Threads::new();
        for (issue_key, body) in raw {
            let issue_id = match issue_key.parse::<u64>() {
                Ok(issue_id) => issue_id,
                Err(e) => {
                    warn!(issue_key = %issue_key, error = %e, "Invalid thread key, skipping thread");
                    continue;
                }
            };

            match body {
                Value::Array(values) => {
                    threads.insert(issue_id, decode_records(StoreKey::Messages, values));
                }
                other => {
                    warn!(issue_id = issue_id, body = %other, "Thread is not a list, skipping thread");
                }
            }
        }
        Ok(threads)
    }

    pub fn save_threads(&self, threads: &Threads) -> Result<(), StoreError> {
        self.save(StoreKey::Messages, threads)
    }

    /// The allow-list; never empty
    pub fn admin_emails(&self) -> Vec<String> {
        self.with_bootstrap_admin(self.records(StoreKey::AdminEmails))
    }

    pub fn try_admin_emails(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.with_bootstrap_admin(self.try_records(StoreKey::AdminEmails)?))
    }

    fn with_bootstrap_admin(&self, emails: Vec<String>) -> Vec<String> {
        if emails.is_empty() {
            return vec![self.bootstrap_admin.clone()];
        }
        emails
    }

    pub fn save_admin_emails(&self, emails: &[String]) -> Result<(), StoreError> {
        self.save(StoreKey::AdminEmails, emails)
    }

    pub fn current_user(&self) -> Option<User> {
        self.load::<Option<User>>(StoreKey::CurrentUser).flatten()
    }

    /// Persist the session pointer; `None` is stored as `null`
    pub fn save_current_user(&self, user: Option<&User>) -> Result<(), StoreError> {
        self.save(StoreKey::CurrentUser, &user)
    }
}

fn decode_records<T: DeserializeOwned>(key: StoreKey, values: Vec<Value>) -> Vec<T> {
    let mut records = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    key = %key,
                    index = index,
                    error = %e,
                    "Failed to decode stored record, skipping"
                );
            }
        }
    }

    records
}
