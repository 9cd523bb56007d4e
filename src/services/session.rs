use crate::core::error::HelpCenterError;
use crate::models::user::{User, UserProfile, UserSummary};
use crate::security::admin_gate::AdminGate;
use crate::stores::ids::IdGenerator;
use crate::stores::store::Store;
use crate::utils::auth::Passwords;
use crate::utils::time::now;
use tracing::{info, warn};

/// Registration, login and the process-wide session pointer
pub struct SessionManager<'a> {
    store: &'a Store,
    ids: &'a IdGenerator,
    passwords: &'a Passwords,
}

impl<'a> SessionManager<'a> {
    pub fn new(store: &'a Store, ids: &'a IdGenerator, passwords: &'a Passwords) -> Self {
        Self { store, ids, passwords }
    }

    /// Create an account and log it in.
    ///
    /// Name and email are stored exactly as given. The account is written
    /// before the session pointer: if the second write fails the account
    /// exists and the caller can still log in with it.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, HelpCenterError> {
        if password != confirm_password {
            return Err(HelpCenterError::PasswordMismatch);
        }

        let mut users = self.store.try_users()?;
        if users.iter().any(|u| u.email == email) {
            warn!(email = %email, "Registration with an email already in use");
            return Err(HelpCenterError::EmailTaken);
        }

        let user = User::new(
            self.ids.next_id()?,
            name.to_string(),
            email.to_string(),
            self.passwords.hash(password)?,
            now(),
        );

        users.push(user.clone());
        self.store.save_users(&users)?;
        self.store.save_current_user(Some(&user))?;

        info!(user_id = user.id, email = %user.email, "User registered");

        Ok(user)
    }

    /// Start a session for the account matching both fields exactly
    pub fn login(&self, email: &str, password: &str) -> Result<User, HelpCenterError> {
        let mut users = self.store.try_users()?;

        let Some(index) = users
            .iter()
            .position(|u| u.email == email && self.passwords.verify(password, &u.password))
        else {
            warn!(email = %email, "Failed login attempt");
            return Err(HelpCenterError::InvalidCredentials);
        };

        if self.passwords.needs_upgrade(&users[index].password) {
            let hashed = self.passwords.hash(password)?;
            users[index].password = hashed;
            match self.store.save_users(&users) {
                Ok(()) => info!(user_id = users[index].id, "Upgraded legacy password to hash"),
                Err(e) => {
                    warn!(user_id = users[index].id, error = %e, "Failed to persist password upgrade");
                    // Continue anyway - the plaintext record still verifies
                }
            }
        }

        let user = users.swap_remove(index);
        self.store.save_current_user(Some(&user))?;

        info!(user_id = user.id, email = %user.email, "User logged in");

        Ok(user)
    }

    pub fn logout(&self) -> Result<(), HelpCenterError> {
        let previous = self.store.current_user();
        self.store.save_current_user(None)?;

        if let Some(user) = previous {
            info!(user_id = user.id, "User logged out");
        }

        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.current_user()
    }

    /// Account overview for the logged-in user
    pub fn profile(&self) -> Option<UserProfile> {
        let user = self.current_user()?;
        let issue_count = self
            .store
            .issues()
            .iter()
            .filter(|i| i.user_id == user.id)
            .count();
        let rating_count = self
            .store
            .ratings()
            .iter()
            .filter(|r| r.user_id == user.id)
            .count();
        let is_admin = AdminGate::new(self.store).is_admin(Some(&user));

        Some(UserProfile {
            user: UserSummary::from_user(&user, is_admin),
            issue_count,
            rating_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::error::HelpCenterError;
    use crate::models::catalog::{IssueType, Tool};
    use crate::models::issue::NewIssue;
    use crate::models::rating::NewRating;
    use crate::models::user::User;
    use crate::services::desk::test_desk;
    use crate::services::desk::HelpDesk;
    use crate::stores::backend::{Backend, FaultyBackend, MemoryBackend};
    use crate::stores::store::{Store, StoreKey};
    use crate::utils::auth::{is_password_hash, test_passwords};
    use chrono::Utc;

    #[test]
    fn test_register_then_login_same_id() {
        let desk = test_desk();
        let accounts = [("A", "a@x.com", "pw1"), ("B", "b@x.com", "pw2"), ("C", "c@x.com", "pw3")];

        for (name, email, password) in accounts {
            let registered = desk.sessions().register(name, email, password, password).unwrap();
            desk.sessions().logout().unwrap();

            let logged_in = desk.sessions().login(email, password).unwrap();
            assert_eq!(logged_in.id, registered.id);
            assert_eq!(desk.sessions().current_user().map(|u| u.id), Some(registered.id));
        }
    }

    #[test]
    fn test_register_sets_session_and_hashes_password() {
        let desk = test_desk();
        let user = desk.sessions().register("Ann", "a@x.com", "pw1", "pw1").unwrap();

        assert_eq!(user.name, "Ann");
        assert!(user.status.is_active());
        assert!(is_password_hash(&user.password));
        assert_eq!(desk.sessions().current_user(), Some(user));
    }

    #[test]
    fn test_register_duplicate_email() {
        let desk = test_desk();
        desk.sessions().register("A", "a@x.com", "pw1", "pw1").unwrap();

        let result = desk.sessions().register("A2", "a@x.com", "other", "other");
        assert_eq!(result, Err(HelpCenterError::EmailTaken));
        assert_eq!(desk.store().users().len(), 1);
    }

    #[test]
    fn test_email_uniqueness_is_case_sensitive() {
        let desk = test_desk();
        desk.sessions().register("A", "a@x.com", "pw1", "pw1").unwrap();

        assert!(desk.sessions().register("A", "A@x.com", "pw1", "pw1").is_ok());
        assert_eq!(desk.store().users().len(), 2);
    }

    #[test]
    fn test_register_password_mismatch() {
        let desk = test_desk();

        let result = desk.sessions().register("A", "a@x.com", "pw1", "pw2");
        assert_eq!(result, Err(HelpCenterError::PasswordMismatch));
        assert!(desk.store().users().is_empty());
        assert!(desk.sessions().current_user().is_none());
    }

    #[test]
    fn test_login_invalid_credentials() {
        let desk = test_desk();
        desk.sessions().register("A", "a@x.com", "pw1", "pw1").unwrap();
        desk.sessions().logout().unwrap();

        assert_eq!(
            desk.sessions().login("a@x.com", "wrong"),
            Err(HelpCenterError::InvalidCredentials)
        );
        assert_eq!(
            desk.sessions().login("nobody@x.com", "pw1"),
            Err(HelpCenterError::InvalidCredentials)
        );
        assert!(desk.sessions().current_user().is_none());
    }

    #[test]
    fn test_logout_persists_null() {
        let desk = test_desk();
        desk.sessions().register("A", "a@x.com", "pw1", "pw1").unwrap();

        desk.sessions().logout().unwrap();
        assert!(desk.sessions().current_user().is_none());
        assert_eq!(desk.store().raw(StoreKey::CurrentUser).unwrap(), Some(b"null".to_vec()));
    }

    #[test]
    fn test_legacy_plaintext_password_upgraded_on_login() {
        let backend = MemoryBackend::new();
        let store = Store::new(backend, "admin@x.com");
        let legacy = User::new(1, "Old".into(), "old@x.com".into(), "pw1".into(), Utc::now());
        store.save_users(&[legacy]).unwrap();
        let desk = HelpDesk::new(store, test_passwords());

        let user = desk.sessions().login("old@x.com", "pw1").unwrap();
        assert_eq!(user.id, 1);
        assert!(is_password_hash(&user.password));

        let stored = &desk.store().users()[0];
        assert!(is_password_hash(&stored.password));

        desk.sessions().logout().unwrap();
        assert!(desk.sessions().login("old@x.com", "pw1").is_ok());
    }

    #[test]
    fn test_profile_counts_own_records() {
        let desk = test_desk();
        let other = desk.sessions().register("B", "b@x.com", "pw", "pw").unwrap();
        desk.ratings()
            .submit(
                Some(&other),
                NewRating {
                    tool: Tool::Dashboard,
                    rating: 2,
                    comments: None,
                    contact_email: "b@x.com".to_string(),
                },
            )
            .unwrap();

        let user = desk.sessions().register("A", "a@x.com", "pw", "pw").unwrap();
        for _ in 0..2 {
            desk.issues()
                .submit(
                    Some(&user),
                    NewIssue {
                        tool: Tool::ApiClient,
                        issue_type: IssueType::Performance,
                        title: "Slow".to_string(),
                        description: "Slow calls".to_string(),
                        contact_email: "a@x.com".to_string(),
                    },
                )
                .unwrap();
        }

        let profile = desk.sessions().profile().unwrap();
        assert_eq!(profile.user.id, user.id);
        assert_eq!(profile.issue_count, 2);
        assert_eq!(profile.rating_count, 0);
        assert!(!profile.user.is_admin);
    }

    #[test]
    fn test_profile_none_when_logged_out() {
        let desk = test_desk();
        assert!(desk.sessions().profile().is_none());
    }

    #[test]
    fn test_email_is_matched_exactly() {
        let desk = test_desk();
        desk.sessions().register("A", "a@x.com", "pw1", "pw1").unwrap();
        desk.sessions().logout().unwrap();

        assert_eq!(
            desk.sessions().login("  a@x.com  ", "pw1"),
            Err(HelpCenterError::InvalidCredentials)
        );
        assert!(desk.sessions().current_user().is_none());

        let padded = desk.sessions().register("B", " b@x.com", "pw2", "pw2").unwrap();
        assert_eq!(padded.email, " b@x.com");
        assert_eq!(
            desk.sessions().login("b@x.com", "pw2"),
            Err(HelpCenterError::InvalidCredentials)
        );
    }

    #[test]
    fn test_unreadable_users_never_overwritten() {
        let inner = MemoryBackend::new();
        let existing = User::new(1, "Old".into(), "old@x.com".into(), "pw1".into(), Utc::now());
        inner
            .insert_raw("users", serde_json::to_vec(&[existing]).unwrap())
            .unwrap();
        let before = inner.read("users").unwrap();
        let backend = FaultyBackend {
            inner: inner.clone(),
            unreadable: Some("users"),
            unwritable: None,
        };
        let desk = HelpDesk::new(Store::new(backend, "admin@x.com"), test_passwords());

        let result = desk.sessions().register("New", "new@x.com", "pw", "pw");
        assert!(matches!(result, Err(HelpCenterError::Storage(_))));
        assert_eq!(inner.read("users").unwrap(), before);
        assert!(desk.sessions().current_user().is_none());
    }

    #[test]
    fn test_register_keeps_account_when_session_write_fails() {
        let inner = MemoryBackend::new();
        let backend = FaultyBackend {
            inner: inner.clone(),
            unreadable: None,
            unwritable: Some("currentUser"),
        };
        let desk = HelpDesk::new(Store::new(backend, "admin@x.com"), test_passwords());

        let result = desk.sessions().register("A", "a@x.com", "pw1", "pw1");
        assert!(matches!(result, Err(HelpCenterError::Storage(_))));
        assert_eq!(desk.store().users().len(), 1);
        assert_eq!(
            desk.sessions().register("A", "a@x.com", "pw1", "pw1"),
            Err(HelpCenterError::EmailTaken)
        );

        let reopened = HelpDesk::new(Store::new(inner, "admin@x.com"), test_passwords());
        assert_eq!(reopened.sessions().login("a@x.com", "pw1").unwrap().email, "a@x.com");
    }
}
