use anyhow::{Context, Result};
use tracing::info;

use crate::core::config::Config;
use crate::services::desk::HelpDesk;
use crate::stores::store::StoreKey;

// this runs at boot time
pub fn open_desk(config: &Config) -> Result<HelpDesk> {
    let desk = HelpDesk::open(config).context("Failed to open help desk store")?;

    let store = desk.store();
    let threads = store.threads();
    info!(
        store_path = %config.store.path.display(),
        users = store.users().len(),
        issues = store.issues().len(),
        ratings = store.ratings().len(),
        threads = threads.len(),
        messages = threads.values().map(Vec::len).sum::<usize>(),
        admin_emails = store.admin_emails().len(),
        logged_in = store.current_user().is_some(),
        "Store loaded"
    );

    seed_admin_list(&desk)?;

    Ok(desk)
}

/// Write the bootstrap allow-list out so it is visible on disk from the first run
fn seed_admin_list(desk: &HelpDesk) -> Result<()> {
    let store = desk.store();
    let stored = store.raw(StoreKey::AdminEmails).context("Failed to read admin list")?;

    if stored.is_none() {
        let emails = store.admin_emails();
        store
            .save_admin_emails(&emails)
            .context("Failed to write initial admin list")?;
        info!(bootstrap_admin = %store.bootstrap_admin(), "Seeded admin allow-list");
    }

    Ok(())
}
