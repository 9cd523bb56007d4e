use crate::core::error::HelpCenterError;
use crate::models::issue::{Issue, IssueFilter, IssueStatus, NewIssue, ThreadSummary};
use crate::models::message::{Message, Sender};
use crate::models::user::User;
use crate::security::admin_gate::AdminGate;
use crate::stores::ids::IdGenerator;
use crate::stores::store::Store;
use crate::utils::time::now;
use tracing::{debug, info};

/// Issue reports and their message threads
pub struct IssueService<'a> {
    store: &'a Store,
    ids: &'a IdGenerator,
}

impl<'a> IssueService<'a> {
    pub fn new(store: &'a Store, ids: &'a IdGenerator) -> Self {
        Self { store, ids }
    }

    fn gate(&self) -> AdminGate<'a> {
        AdminGate::new(self.store)
    }

    /// File a new issue for the logged-in user and open an empty thread for it
    pub fn submit(&self, session: Option<&User>, form: NewIssue) -> Result<Issue, HelpCenterError> {
        let user = session.ok_or(HelpCenterError::AuthRequired)?;

        let issue = Issue {
            id: self.ids.next_id()?,
            user_id: user.id,
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            tool: form.tool,
            issue_type: form.issue_type,
            title: form.title,
            description: form.description,
            email: form.contact_email,
            timestamp: now(),
            status: IssueStatus::New,
        };

        // Thread first: an issue is never visible without one
        let mut threads = self.store.try_threads()?;
        threads.entry(issue.id).or_default();
        self.store.save_threads(&threads)?;

        let mut issues = self.store.try_issues()?;
        issues.push(issue.clone());
        self.store.save_issues(&issues)?;

        info!(
            issue_id = issue.id,
            user_id = user.id,
            tool = %issue.tool,
            issue_type = %issue.issue_type,
            "Issue submitted"
        );

        Ok(issue)
    }

    /// Issues matching the filter, newest first
    pub fn list(&self, filter: IssueFilter) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .store
            .issues()
            .into_iter()
            .filter(|i| filter.matches(i.status))
            .collect();
        sort_newest_first(&mut issues);

        debug!(filter = ?filter, count = issues.len(), "Listed issues");
        issues
    }

    pub fn get(&self, issue_id: u64) -> Option<Issue> {
        self.store.issues().into_iter().find(|i| i.id == issue_id)
    }

    /// Mark an issue resolved; resolving twice is a no-op
    pub fn resolve(&self, session: Option<&User>, issue_id: u64) -> Result<Issue, HelpCenterError> {
        let admin = self.gate().require_admin(session)?;

        let mut issues = self.store.try_issues()?;
        let issue = issues
            .iter_mut()
            .find(|i| i.id == issue_id)
            .ok_or_else(|| HelpCenterError::NotFound(format!("Issue {}", issue_id)))?;

        if issue.is_resolved() {
            return Ok(issue.clone());
        }

        issue.status = IssueStatus::Resolved;
        let resolved = issue.clone();
        self.store.save_issues(&issues)?;

        info!(issue_id = issue_id, resolved_by = %admin.email, "Issue resolved");

        Ok(resolved)
    }

    /// Messages on an issue in the order they were posted
    pub fn thread_for(&self, issue_id: u64) -> Vec<Message> {
        self.store
            .threads()
            .remove(&issue_id)
            .unwrap_or_default()
    }

    /// Append a message to an issue's thread.
    ///
    /// Admin messages need an admin session, user messages any session.
    pub fn post_message(
        &self,
        session: Option<&User>,
        issue_id: u64,
        sender: Sender,
        text: &str,
    ) -> Result<Message, HelpCenterError> {
        let author = match sender {
            Sender::Admin => self.gate().require_admin(session)?,
            Sender::User => session.ok_or(HelpCenterError::AuthRequired)?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(HelpCenterError::EmptyMessage);
        }

        if self.get(issue_id).is_none() {
            return Err(HelpCenterError::NotFound(format!("Issue {}", issue_id)));
        }

        let message = Message {
            sender,
            text: text.to_string(),
            timestamp: now(),
        };

        let mut threads = self.store.try_threads()?;
        threads.entry(issue_id).or_default().push(message.clone());
        self.store.save_threads(&threads)?;

        info!(
            issue_id = issue_id,
            sender = ?sender,
            user_id = author.id,
            "Message posted"
        );

        Ok(message)
    }

    /// Unresolved issues with their thread sizes, newest first
    pub fn active_threads(&self, session: Option<&User>) -> Result<Vec<ThreadSummary>, HelpCenterError> {
        self.gate().require_admin(session)?;

        let threads = self.store.threads();
        let mut issues: Vec<Issue> = self
            .store
            .issues()
            .into_iter()
            .filter(|i| !i.is_resolved())
            .collect();
        sort_newest_first(&mut issues);

        Ok(issues
            .into_iter()
            .map(|issue| {
                let message_count = threads.get(&issue.id).map_or(0, Vec::len);
                ThreadSummary { issue, message_count }
            })
            .collect())
    }
}

fn sort_newest_first(issues: &mut [Issue]) {
    issues.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}
