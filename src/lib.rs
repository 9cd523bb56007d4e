pub mod core {
    pub mod config;
    pub mod error;
    pub mod routes;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod models {
    pub mod api;
    pub mod catalog;
    pub mod issue;
    pub mod message;
    pub mod rating;
    pub mod user;
}

pub mod stores {
    pub mod backend;
    pub mod ids;
    pub mod store;
}

pub mod security {
    pub mod admin_gate;
}

pub mod services {
    pub mod desk;
    pub mod issues;
    pub mod ratings;
    pub mod session;
}

pub mod utils {
    pub mod auth;
    pub mod time;
}

pub mod handlers {
    pub mod accounts;
    pub mod admins;
    pub mod catalog;
    pub mod extract;
    pub mod fallback;
    pub mod health;
    pub mod issues;
    pub mod ratings;
}

pub use crate::core::config::Config;
pub use crate::core::error::HelpCenterError;
pub use crate::services::desk::HelpDesk;
