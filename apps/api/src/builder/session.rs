//! Builder sessions, one in-memory resume per editing session.
//!
//! Sessions are never persisted. They end on an explicit delete or when the
//! idle sweeper drops them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::builder::drafts::EntryBuilders;
use crate::builder::outline::{build_outline, EditorSection, SectionOutline};
use crate::builder::store::ResumeStore;
use crate::models::resume::ResumeData;
use crate::models::user::SessionUser;
use crate::render::{render, Document, RenderMode};

#[derive(Debug, Clone)]
pub struct BuilderSession {
    pub id: Uuid,
    pub store: ResumeStore,
    pub drafts: EntryBuilders,
    pub active_section: EditorSection,
    pub show_preview: bool,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Snapshot returned to API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub active_section: EditorSection,
    pub show_preview: bool,
    pub resume: ResumeData,
    pub drafts: EntryBuilders,
    pub outline: Vec<SectionOutline>,
}

impl BuilderSession {
    pub fn new(user: Option<&SessionUser>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            store: ResumeStore::new(user),
            drafts: EntryBuilders::default(),
            active_section: EditorSection::default(),
            show_preview: false,
            created_at: now,
            last_active: now,
        }
    }

    pub fn data(&self) -> &ResumeData {
        self.store.data()
    }

    pub fn toggle_preview(&mut self) -> bool {
        self.show_preview = !self.show_preview;
        self.show_preview
    }

    pub fn render(&self, mode: RenderMode) -> Document {
        render(self.store.data(), mode)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            active_section: self.active_section,
            show_preview: self.show_preview,
            resume: self.store.data().clone(),
            drafts: self.drafts.clone(),
            outline: build_outline(self.store.data(), &self.drafts),
        }
    }
}

/// Registry of live sessions, shared across request handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, BuilderSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, user: Option<&SessionUser>) -> SessionView {
        let session = BuilderSession::new(user);
        let view = session.view();
        self.sessions.write().await.insert(session.id, session);
        info!("Started builder session {}", view.id);
        view
    }

    /// Runs `f` against the session and marks it active. `None` if the session is unknown.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BuilderSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.last_active = Utc::now();
        Some(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Ended builder session {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle since before `now - ttl`. Returns how many were dropped.
    pub async fn expire_idle(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        let cutoff = now - ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active >= cutoff);
        before - sessions.len()
    }
}

/// Periodically drops idle sessions.
pub fn spawn_session_sweeper(store: SessionStore, ttl: Duration) -> JoinHandle<()> {
    let period = ttl
        .to_std()
        .map(|d| (d / 4).max(std::time::Duration::from_secs(1)))
        .unwrap_or(std::time::Duration::from_secs(60));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let expired = store.expire_idle(ttl, Utc::now()).await;
            if expired > 0 {
                info!(
                    "Expired {} idle builder sessions, {} still active",
                    expired,
                    store.len().await
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Collection;

    #[tokio::test]
    async fn test_create_and_mutate_session() {
        let store = SessionStore::new();
        let view = store
            .create(Some(&SessionUser {
                name: Some("Asha Rao".to_string()),
                email: None,
            }))
            .await;
        assert_eq!(view.resume.personal.full_name, "Asha Rao");
        assert_eq!(view.outline.len(), 5);

        let committed = store
            .with_session(view.id, |s| {
                s.drafts.experience.company = "Acme".to_string();
                s.drafts.experience.position = "Engineer".to_string();
                s.drafts.commit(Collection::Experience, &mut s.store)
            })
            .await
            .unwrap();
        assert!(committed.is_some());

        let len = store
            .with_session(view.id, |s| s.data().experience.len())
            .await;
        assert_eq!(len, Some(1));
    }

    #[tokio::test]
    async fn test_unknown_session_is_none() {
        let store = SessionStore::new();
        assert!(store.with_session(Uuid::new_v4(), |_| ()).await.is_none());
        assert!(!store.remove(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_expire_idle_drops_only_stale_sessions() {
        let store = SessionStore::new();
        let stale = store.create(None).await.id;
        let fresh = store.create(None).await.id;

        let ttl = Duration::minutes(30);
        store
            .with_session(stale, |s| s.last_active = Utc::now() - Duration::hours(2))
            .await;
        // with_session touches last_active before running the closure, so the
        // override above sticks.
        let expired = store.expire_idle(ttl, Utc::now()).await;

        assert_eq!(expired, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.with_session(fresh, |_| ()).await.is_some());
    }

    #[test]
    fn test_toggle_preview() {
        let mut session = BuilderSession::new(None);
        assert!(session.toggle_preview());
        assert!(!session.toggle_preview());
    }
}
