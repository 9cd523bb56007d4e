use crate::core::config::Config;
use crate::models::user::User;
use crate::security::admin_gate::AdminGate;
use crate::services::issues::IssueService;
use crate::services::ratings::RatingService;
use crate::services::session::SessionManager;
use crate::stores::backend::FileBackend;
use crate::stores::ids::IdGenerator;
use crate::stores::store::Store;
use crate::utils::auth::Passwords;
use anyhow::{Context, Result};

/// The help center core.
///
/// Owns the store and hands out short-lived service views that borrow it.
/// Every mutating call reads the current document, changes it and writes it
/// back before returning.
pub struct HelpDesk {
    store: Store,
    ids: IdGenerator,
    passwords: Passwords,
}

impl HelpDesk {
    pub fn new(store: Store, passwords: Passwords) -> Self {
        let max_existing = store
            .users()
            .iter()
            .map(|u| u.id)
            .chain(store.issues().iter().map(|i| i.id))
            .chain(store.ratings().iter().map(|r| r.id))
            .max()
            .unwrap_or(0);

        Self {
            store,
            ids: IdGenerator::starting_after(max_existing),
            passwords,
        }
    }

    /// Open the file-backed store described by the configuration
    pub fn open(config: &Config) -> Result<Self> {
        let backend = FileBackend::open(&config.store.path).context(format!(
            "Failed to open store directory: {}",
            config.store.path.display()
        ))?;
        let store = Store::new(backend, config.store.bootstrap_admin.clone());
        let passwords = Passwords::new(&config.auth)?;

        Ok(Self::new(store, passwords))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn sessions(&self) -> SessionManager<'_> {
        SessionManager::new(&self.store, &self.ids, &self.passwords)
    }

    pub fn gate(&self) -> AdminGate<'_> {
        AdminGate::new(&self.store)
    }

    pub fn issues(&self) -> IssueService<'_> {
        IssueService::new(&self.store, &self.ids)
    }

    pub fn ratings(&self) -> RatingService<'_> {
        RatingService::new(&self.store, &self.ids)
    }

    /// Shorthand for the session pointer
    pub fn current_user(&self) -> Option<User> {
        self.store.current_user()
    }
}

#[cfg(test)]
pub(crate) fn test_desk() -> HelpDesk {
    HelpDesk::new(Store::in_memory("admin@x.com"), crate::utils::auth::test_passwords())
}
