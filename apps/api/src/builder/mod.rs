//! Resume builder: data store, entry drafts, editing sessions and their HTTP handlers.

pub mod drafts;
pub mod handlers;
pub mod outline;
pub mod session;
pub mod store;

pub use session::{spawn_session_sweeper, SessionStore};
