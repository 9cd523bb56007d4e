use crate::core::error::HelpCenterError;
use crate::models::user::{User, UserSummary};
use crate::stores::store::Store;
use tracing::{info, warn};

/// Admin privilege checks and allow-list management.
///
/// A session is an admin exactly when its email is on the allow-list; there
/// is no separate admin credential.
pub struct AdminGate<'a> {
    store: &'a Store,
}

impl<'a> AdminGate<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn is_admin(&self, session: Option<&User>) -> bool {
        match session {
            Some(user) => self.store.admin_emails().iter().any(|e| *e == user.email),
            None => false,
        }
    }

    /// Gate for admin-only operations; yields the admin on success
    pub fn require_admin<'u>(&self, session: Option<&'u User>) -> Result<&'u User, HelpCenterError> {
        match session {
            Some(user) if self.is_admin(Some(user)) => Ok(user),
            Some(user) => {
                warn!(user_id = user.id, email = %user.email, "Admin operation refused");
                Err(HelpCenterError::AdminRequired)
            }
            None => {
                warn!("Admin operation refused without a session");
                Err(HelpCenterError::AdminRequired)
            }
        }
    }

    /// Current allow-list, in insertion order
    pub fn admin_emails(&self) -> Vec<String> {
        self.store.admin_emails()
    }

    pub fn add_admin_email(&self, session: Option<&User>, email: &str) -> Result<(), HelpCenterError> {
        let admin = self.require_admin(session)?;

        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(HelpCenterError::InvalidEmail(email.to_string()));
        }

        let mut emails = self.store.try_admin_emails()?;
        if emails.iter().any(|e| e == email) {
            return Err(HelpCenterError::DuplicateAdmin(email.to_string()));
        }

        emails.push(email.to_string());
        self.store.save_admin_emails(&emails)?;

        info!(email = %email, added_by = %admin.email, "Admin email added");

        Ok(())
    }

    /// Remove an email; removing one that is not listed changes nothing
    pub fn remove_admin_email(&self, session: Option<&User>, email: &str) -> Result<(), HelpCenterError> {
        let admin = self.require_admin(session)?;

        let mut emails = self.store.try_admin_emails()?;
        if emails.len() <= 1 {
            return Err(HelpCenterError::LastAdmin);
        }

        let email = email.trim();
        let Some(index) = emails.iter().position(|e| e == email) else {
            return Ok(());
        };

        emails.remove(index);
        self.store.save_admin_emails(&emails)?;

        info!(email = %email, removed_by = %admin.email, "Admin email removed");

        Ok(())
    }

    /// Every registered user, newest first, flagged by admin status
    pub fn list_users(&self, session: Option<&User>) -> Result<Vec<UserSummary>, HelpCenterError> {
        self.require_admin(session)?;

        let admins = self.store.admin_emails();
        let mut users = self.store.users();
        users.sort_by(|a, b| b.registered_at.cmp(&a.registered_at).then(b.id.cmp(&a.id)));

        Ok(users
            .iter()
            .map(|u| UserSummary::from_user(u, admins.contains(&u.email)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::desk::test_desk;
    use crate::stores::store::StoreKey;

    fn register(desk: &crate::services::desk::HelpDesk, email: &str) -> User {
        desk.sessions().register("Someone", email, "pw", "pw").unwrap()
    }

    #[test]
    fn test_is_admin_by_allow_list() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");
        let user = register(&desk, "a@x.com");

        assert!(desk.gate().is_admin(Some(&admin)));
        assert!(!desk.gate().is_admin(Some(&user)));
        assert!(!desk.gate().is_admin(None));
    }

    #[test]
    fn test_require_admin() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");
        let user = register(&desk, "a@x.com");

        assert_eq!(desk.gate().require_admin(Some(&admin)).map(|u| u.id), Ok(admin.id));
        assert_eq!(
            desk.gate().require_admin(Some(&user)).map(|u| u.id),
            Err(HelpCenterError::AdminRequired)
        );
        assert_eq!(
            desk.gate().require_admin(None).map(|u| u.id),
            Err(HelpCenterError::AdminRequired)
        );
    }

    #[test]
    fn test_add_admin_email() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");

        desk.gate().add_admin_email(Some(&admin), "  b@x.com ").unwrap();
        assert_eq!(
            desk.gate().admin_emails(),
            vec!["admin@x.com".to_string(), "b@x.com".to_string()]
        );

        let promoted = register(&desk, "b@x.com");
        assert!(desk.gate().is_admin(Some(&promoted)));
    }

    #[test]
    fn test_add_duplicate_admin_email() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");

        let result = desk.gate().add_admin_email(Some(&admin), "admin@x.com");
        assert_eq!(result, Err(HelpCenterError::DuplicateAdmin("admin@x.com".to_string())));
        assert_eq!(desk.gate().admin_emails().len(), 1);
    }

    #[test]
    fn test_add_invalid_admin_email() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");

        assert!(matches!(
            desk.gate().add_admin_email(Some(&admin), "   "),
            Err(HelpCenterError::InvalidEmail(_))
        ));
        assert!(matches!(
            desk.gate().add_admin_email(Some(&admin), "no-at-sign"),
            Err(HelpCenterError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_remove_last_admin_refused() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");

        let result = desk.gate().remove_admin_email(Some(&admin), "admin@x.com");
        assert_eq!(result, Err(HelpCenterError::LastAdmin));
        assert_eq!(desk.gate().admin_emails(), vec!["admin@x.com".to_string()]);
    }

    #[test]
    fn test_remove_admin_email() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");
        desk.gate().add_admin_email(Some(&admin), "b@x.com").unwrap();

        desk.gate().remove_admin_email(Some(&admin), "b@x.com").unwrap();
        assert_eq!(desk.gate().admin_emails(), vec!["admin@x.com".to_string()]);

        // Unknown email is a no-op
        desk.gate().add_admin_email(Some(&admin), "c@x.com").unwrap();
        desk.gate().remove_admin_email(Some(&admin), "zzz@x.com").unwrap();
        assert_eq!(desk.gate().admin_emails().len(), 2);
    }

    #[test]
    fn test_non_admin_cannot_touch_allow_list() {
        let desk = test_desk();
        let admin = register(&desk, "admin@x.com");
        desk.gate().add_admin_email(Some(&admin), "b@x.com").unwrap();
        let user = register(&desk, "a@x.com");
        let before = desk.store().raw(StoreKey::AdminEmails).unwrap();

        assert_eq!(
            desk.gate().add_admin_email(Some(&user), "a@x.com"),
            Err(HelpCenterError::AdminRequired)
        );
        assert_eq!(
            desk.gate().remove_admin_email(Some(&user), "b@x.com"),
            Err(HelpCenterError::AdminRequired)
        );
        assert_eq!(
            desk.gate().add_admin_email(None, "a@x.com"),
            Err(HelpCenterError::AdminRequired)
        );
        assert_eq!(desk.store().raw(StoreKey::AdminEmails).unwrap(), before);
    }

    #[test]
    fn test_list_users_newest_first_with_roles() {
        let desk = test_desk();
        let first = register(&desk, "a@x.com");
        let admin = register(&desk, "admin@x.com");
        let last = register(&desk, "c@x.com");

        let users = desk.gate().list_users(Some(&admin)).unwrap();
        let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![last.id, admin.id, first.id]);
        assert!(users[1].is_admin);
        assert!(!users[0].is_admin);

        assert_eq!(desk.gate().list_users(Some(&first)), Err(HelpCenterError::AdminRequired));
    }
}
