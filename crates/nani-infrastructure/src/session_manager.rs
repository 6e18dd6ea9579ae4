//! Lifecycle of the single active session.
//!
//! # Active slot
//!
//! ```text
//!            start / resume
//!   Empty ─────────────────────▶ Active ──┐
//!     ▲                            │      │ start / resume
//!     └──────────── archive ───────┘ ◀────┘ (archive, then create or load)
//! ```
//!
//! The active session lives in `session.json`; archived sessions live in
//! `sessions/<id>.json` and are indexed by id. Sessions store their role by
//! name and get the full role back from the role registry on load.

use crate::dto::SessionDTO;
use crate::paths::ArtifactKind;
use crate::role_registry::load_role;
use crate::workspace::Workspace;
use chrono::Utc;
use nani_core::context::SessionSummary;
use nani_core::role::validate_artifact_key;
use nani_core::session::{Chat, Session};
use nani_core::{NaniError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub struct SessionManager<'a> {
    workspace: &'a mut Workspace,
}

impl<'a> SessionManager<'a> {
    pub(crate) fn new(workspace: &'a mut Workspace) -> Self {
        Self { workspace }
    }

    /// Loads the active session, if there is one.
    pub fn active(&self) -> Result<Option<Session>> {
        let path = self.workspace.paths().active_session_file();
        match self.workspace.store().load_json::<SessionDTO>(&path)? {
            Some(dto) => self.rehydrate(dto).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the active session, starting one with `label` and
    /// `desired_role` when the slot is empty.
    pub fn ensure_active(&mut self, label: &str, desired_role: Option<&str>) -> Result<Session> {
        match self.active()? {
            Some(session) => Ok(session),
            None => self.start(label, desired_role),
        }
    }

    /// Archives the current session (if any) and starts a new one.
    ///
    /// `desired_role` is used when it is present in the role index; otherwise
    /// the workspace default role is used and the fallback is logged.
    ///
    /// # Errors
    ///
    /// Fails if archiving fails or the resolved role cannot be loaded.
    pub fn start(&mut self, label: &str, desired_role: Option<&str>) -> Result<Session> {
        self.archive()?;

        let role_name = self.resolve_role_name(desired_role);
        let role = load_role(self.workspace, &role_name)?;
        let session = Session::new(label, role, Utc::now());

        self.save_active(&session)?;
        tracing::info!(
            session_id = %session.id,
            role = %session.role.name,
            "Started session '{}'",
            session.label
        );
        self.workspace.record(format!(
            "Started new session: {} (label: {}, role: {})",
            session.id, session.label, session.role.name
        ))?;
        Ok(session)
    }

    /// Moves the active session into the archive.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(summary))`: The session that was archived
    /// - `Ok(None)`: No session was active; nothing changed
    pub fn archive(&mut self) -> Result<Option<SessionSummary>> {
        let Some(session) = self.active()? else {
            return Ok(None);
        };

        let archive_path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Session, &session.id);
        self.workspace
            .store()
            .write_json(&archive_path, &SessionDTO::from(&session))?;
        self.workspace
            .store()
            .remove(&self.workspace.paths().active_session_file())?;

        let summary = session.summary();
        self.workspace
            .indexes_mut()
            .sessions
            .insert(summary.id.clone(), summary.clone());
        self.workspace.save_context()?;

        tracing::info!(session_id = %summary.id, "Archived session");
        self.workspace
            .record(format!("Archived session: {}", summary.id))?;
        Ok(Some(summary))
    }

    /// Archives the current session (if any) and makes archived session `id`
    /// active again.
    ///
    /// # Errors
    ///
    /// `NaniError::NotFound` when `id` has no archived record, or when its
    /// role no longer resolves.
    pub fn resume(&mut self, id: &str) -> Result<Session> {
        validate_artifact_key("session", id)?;
        self.archive()?;

        let session = self.archived(id)?;
        self.save_active(&session)?;

        self.workspace.indexes_mut().sessions.remove(id);
        self.workspace.save_context()?;

        let archive_path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Session, id);
        if let Err(e) = self.workspace.store().remove(&archive_path) {
            self.workspace
                .warn(format!("Failed to remove archived session file {}: {}", id, e));
        }

        tracing::info!(session_id = %id, "Resumed session");
        self.workspace.record(format!("Resumed session: {}", id))?;
        Ok(session)
    }

    /// Loads an archived session without resuming it.
    pub fn archived(&self, id: &str) -> Result<Session> {
        validate_artifact_key("session", id)?;
        let path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Session, id);
        let dto = self
            .workspace
            .store()
            .load_json::<SessionDTO>(&path)?
            .ok_or_else(|| NaniError::not_found(ArtifactKind::Session.label(), id))?;
        self.rehydrate(dto)
    }

    /// Archived sessions from the index, most recently updated first.
    pub fn list_archived(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> = self
            .workspace
            .artifact_indexes()
            .sessions
            .values()
            .cloned()
            .collect();
        summaries.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| a.id.cmp(&b.id))
        });
        summaries
    }

    /// Adds a file reference to the active session. Adding a path that is
    /// already listed changes nothing.
    ///
    /// # Errors
    ///
    /// - `NaniError::NoActiveSession`
    /// - `NaniError::NotFound` when `path` does not exist
    pub fn add_source(&mut self, path: impl AsRef<Path>) -> Result<Session> {
        let path = path.as_ref();
        let mut session = self.require_active()?;

        match fs::metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NaniError::not_found(
                    "source file",
                    path.display().to_string(),
                ));
            }
            Err(e) => return Err(NaniError::io_at("inspect", path, e)),
        }

        let source = path.to_string_lossy().into_owned();
        if !session.add_source(source.clone()) {
            tracing::debug!(session_id = %session.id, "Source already present: {}", source);
            return Ok(session);
        }

        session.touch(Utc::now());
        self.save_active(&session)?;
        self.workspace
            .record(format!("Added source to session {}: {}", session.id, source))?;
        Ok(session)
    }

    /// Appends a message/response exchange to the active session.
    pub fn add_interaction(&mut self, message: &str, response: &str) -> Result<Chat> {
        let mut session = self.require_active()?;
        let chat = session
            .push_chat(message, response, Utc::now())
            .clone();

        self.save_active(&session)?;
        tracing::debug!(session_id = %session.id, chat_id = %chat.id, "Added interaction");
        self.workspace.record(format!(
            "Added interaction to session {} (chat: {})",
            session.id, chat.id
        ))?;
        Ok(chat)
    }

    /// Replaces the active session's role.
    ///
    /// # Errors
    ///
    /// `NaniError::NotFound` when `role_name` cannot be loaded; the session is
    /// left untouched.
    pub fn switch_role(&mut self, role_name: &str) -> Result<Session> {
        let mut session = self.require_active()?;
        let role = load_role(self.workspace, role_name)?;

        session.role = role;
        session.touch(Utc::now());
        self.save_active(&session)?;

        tracing::info!(session_id = %session.id, role = %role_name, "Switched role");
        self.workspace.record(format!(
            "Switched session {} to role: {}",
            session.id, role_name
        ))?;
        Ok(session)
    }

    fn require_active(&self) -> Result<Session> {
        self.active()?.ok_or(NaniError::NoActiveSession)
    }

    fn save_active(&self, session: &Session) -> Result<()> {
        self.workspace.store().write_json(
            &self.workspace.paths().active_session_file(),
            &SessionDTO::from(session),
        )
    }

    fn rehydrate(&self, dto: SessionDTO) -> Result<Session> {
        let role = load_role(self.workspace, &dto.role)?;
        Ok(dto.into_domain(role))
    }

    fn resolve_role_name(&self, desired_role: Option<&str>) -> String {
        let default_role = self.workspace.settings().default_role.clone();
        match desired_role.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) if self.workspace.artifact_indexes().roles.contains_key(name) => {
                name.to_string()
            }
            Some(name) => {
                self.workspace.warn(format!(
                    "Desired role '{}' not found. Falling back to default role '{}'.",
                    name, default_role
                ));
                default_role
            }
            None => default_role,
        }
    }
}
