use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::designer::{DesignerError, DesignerOp, DesignerSession, DesignerSessionView};
use crate::layout::Layout;

/// What a save writes: the session's name and layout at the moment of saving.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSnapshot {
    pub template_id: Option<i32>,
    pub name: String,
    pub layout: Layout,
}

/// All open designer sessions, shared through `AppState`.
#[derive(Clone, Default)]
pub struct DesignerSessions {
    inner: Arc<RwLock<HashMap<Uuid, DesignerSession>>>,
}

fn owned<'a>(
    sessions: &'a HashMap<Uuid, DesignerSession>,
    owner: Uuid,
    id: Uuid,
) -> Result<&'a DesignerSession, DesignerError> {
    sessions
        .get(&id)
        .filter(|s| s.owner == owner)
        .ok_or(DesignerError::SessionNotFound(id))
}

fn owned_mut<'a>(
    sessions: &'a mut HashMap<Uuid, DesignerSession>,
    owner: Uuid,
    id: Uuid,
) -> Result<&'a mut DesignerSession, DesignerError> {
    sessions
        .get_mut(&id)
        .filter(|s| s.owner == owner)
        .ok_or(DesignerError::SessionNotFound(id))
}

impl DesignerSessions {
    pub async fn open(
        &self,
        owner: Uuid,
        owner_expires_at: DateTime<Utc>,
        template_id: Option<i32>,
        name: String,
        layout: Layout,
    ) -> DesignerSessionView {
        let session = DesignerSession::new(owner, owner_expires_at, template_id, name, layout);
        let view = session.view();

        let mut sessions = self.inner.write().await;
        sessions.insert(session.id, session);
        debug!("Opened designer session {} ({} open)", view.id, sessions.len());
        view
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<DesignerSessionView, DesignerError> {
        let sessions = self.inner.read().await;
        Ok(owned(&sessions, owner, id)?.view())
    }

    pub async fn apply(
        &self,
        owner: Uuid,
        id: Uuid,
        op: DesignerOp,
    ) -> Result<(DesignerSessionView, Option<String>), DesignerError> {
        let mut sessions = self.inner.write().await;
        let session = owned_mut(&mut sessions, owner, id)?;
        let added = session.apply(op)?;
        Ok((session.view(), added))
    }

    pub async fn snapshot_for_save(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<SaveSnapshot, DesignerError> {
        let sessions = self.inner.read().await;
        let session = owned(&sessions, owner, id)?;
        Ok(SaveSnapshot {
            template_id: session.template_id,
            name: session.name.clone(),
            layout: session.editor.layout().clone(),
        })
    }

    /// Binds the session to `template_id`. It stays dirty if edits arrived
    /// while the save was in flight.
    pub async fn mark_saved(
        &self,
        owner: Uuid,
        id: Uuid,
        template_id: i32,
        saved: &SaveSnapshot,
    ) -> Result<DesignerSessionView, DesignerError> {
        let mut sessions = self.inner.write().await;
        let session = owned_mut(&mut sessions, owner, id)?;
        session.template_id = Some(template_id);
        session.dirty = session.name != saved.name || session.editor.layout() != &saved.layout;
        Ok(session.view())
    }

    pub async fn close(&self, owner: Uuid, id: Uuid) -> Result<(), DesignerError> {
        let mut sessions = self.inner.write().await;
        owned(&sessions, owner, id)?;
        sessions.remove(&id);
        Ok(())
    }

    /// Drops every session owned by a login session. Returns how many closed.
    pub async fn close_all_for(&self, owner: Uuid) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.owner != owner);
        before - sessions.len()
    }

    /// Drops sessions whose login session has expired without a logout.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.owner_expires_at > now);
        before - sessions.len()
    }
}
