//! Request orchestration between the workspace and a completion provider.

use crate::prompt::{assemble_prompt, establish_instructions};
use nani_core::config::{DEFAULT_SESSION_LABEL, NaniConfig};
use nani_core::provider::CompletionProvider;
use nani_core::response::{RESPONSE_SCHEMA_HINT, Response, ResponseError, parse_response};
use nani_core::{NaniError, Result};
use nani_infrastructure::Workspace;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Upper bound for a single provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a submitted message.
///
/// When the provider's text did not follow the response structure,
/// `response` is the fallback record (raw text in `content`) and
/// `codec_error` says why. Nothing is appended to the session in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub response: Response,
    pub codec_error: Option<ResponseError>,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.codec_error.is_some()
    }
}

/// Drives one provider conversation on behalf of the active session.
///
/// # Concurrency
///
/// Only one request may be in flight. A second `submit`/`establish` while one
/// is running fails with `NaniError::Busy`. Every request is bounded by
/// [`REQUEST_TIMEOUT`] and can be aborted with [`ChatService::cancel`]; both
/// surface as ordinary errors.
pub struct ChatService {
    workspace: Arc<Mutex<Workspace>>,
    provider: Arc<dyn CompletionProvider>,
    session_label: String,
    desired_role: Option<String>,
    instructions: String,
    busy: AtomicBool,
    in_flight: StdMutex<Option<CancellationToken>>,
}

impl ChatService {
    /// Creates a service with the default session label, the workspace
    /// default role and the built-in establish instructions.
    pub fn new(workspace: Arc<Mutex<Workspace>>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            workspace,
            provider,
            session_label: DEFAULT_SESSION_LABEL.to_string(),
            desired_role: None,
            instructions: establish_instructions(&Default::default()),
            busy: AtomicBool::new(false),
            in_flight: StdMutex::new(None),
        }
    }

    /// Creates a service using the `[session]` and `[provider]` sections of
    /// `config`.
    pub fn from_config(
        workspace: Arc<Mutex<Workspace>>,
        provider: Arc<dyn CompletionProvider>,
        config: &NaniConfig,
    ) -> Self {
        let mut service = Self::new(workspace, provider);
        service.session_label = config.session.default_label.clone();
        service.desired_role = config.session.default_role.clone();
        service.instructions = establish_instructions(&config.provider);
        service
    }

    pub fn workspace(&self) -> &Arc<Mutex<Workspace>> {
        &self.workspace
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Cancels the in-flight request, if any.
    ///
    /// # Returns
    ///
    /// `true` if a request was running and has been signalled.
    pub fn cancel(&self) -> bool {
        let slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(token) => {
                token.cancel();
                tracing::info!("Cancellation requested for in-flight request");
                true
            }
            None => false,
        }
    }

    /// Opens the provider conversation with the establish instructions and
    /// the response schema hint. Returns the provider's raw acknowledgement.
    pub async fn establish(&self) -> Result<String> {
        let request = InFlight::acquire(self)?;
        let raw = self
            .bounded(
                self.provider
                    .establish_session(&self.instructions, RESPONSE_SCHEMA_HINT),
                request.token(),
            )
            .await?;
        tracing::info!("Provider session established");
        self.workspace
            .lock()
            .await
            .action_log()
            .record("Established provider session")?;
        Ok(raw)
    }

    /// Sends `message` in the context of the active session (started with the
    /// configured label and role when the slot is empty).
    ///
    /// A structured reply is recorded as the message paired with the reply's
    /// `summary`, which is what later prompts replay as history.
    ///
    /// # Errors
    ///
    /// - `NaniError::InvalidArgument`: `message` is blank
    /// - `NaniError::Busy`: another request is in flight
    /// - `NaniError::Timeout` / `NaniError::Cancelled`: the request was cut short
    /// - `NaniError::Provider`: the provider failed
    /// - Store errors from loading or saving the session
    ///
    /// A reply that does not follow the response structure is not an error;
    /// see [`Reply`].
    pub async fn submit(&self, message: &str) -> Result<Reply> {
        if message.trim().is_empty() {
            return Err(NaniError::invalid_argument("message must not be empty"));
        }
        let request = InFlight::acquire(self)?;

        let prompt = {
            let mut workspace = self.workspace.lock().await;
            let session = workspace
                .sessions()
                .ensure_active(&self.session_label, self.desired_role.as_deref())?;
            let preferences = workspace.preferences().load_all()?;
            assemble_prompt(
                workspace.settings(),
                &session,
                &preferences,
                message,
                workspace.action_log(),
            )
        };
        tracing::debug!(prompt_len = prompt.len(), "Sending prompt");

        let raw = self
            .bounded(self.provider.send_prompt(&prompt), request.token())
            .await?;

        match parse_response(&raw) {
            Ok(response) => {
                let mut workspace = self.workspace.lock().await;
                let chat = workspace
                    .sessions()
                    .add_interaction(message, &response.summary)?;
                tracing::debug!(chat_id = %chat.id, "Reply recorded");
                Ok(Reply {
                    response,
                    codec_error: None,
                })
            }
            Err(failure) => {
                let (fallback, error) = failure.into_parts();
                tracing::warn!("Reply did not follow the response structure: {}", error);
                Ok(Reply {
                    response: fallback,
                    codec_error: Some(error),
                })
            }
        }
    }

    /// Awaits `call`, bounded by the timeout and the cancellation token.
    async fn bounded<F>(&self, call: F, token: &CancellationToken) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        tokio::select! {
            result = call => result.map_err(|e| match e {
                NaniError::Provider(_) => e,
                other => NaniError::provider(other.to_string()),
            }),
            () = tokio::time::sleep(REQUEST_TIMEOUT) => {
                tracing::warn!(timeout_secs = REQUEST_TIMEOUT.as_secs(), "Provider request timed out");
                Err(NaniError::Timeout { seconds: REQUEST_TIMEOUT.as_secs() })
            }
            () = token.cancelled() => {
                tracing::debug!("Provider request cancelled");
                Err(NaniError::Cancelled)
            }
        }
    }
}

/// Holds the busy flag and the cancellation slot for one request; both are
/// released on drop, whatever path the request took.
struct InFlight<'a> {
    service: &'a ChatService,
    token: CancellationToken,
}

impl<'a> InFlight<'a> {
    fn acquire(service: &'a ChatService) -> Result<Self> {
        service
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| NaniError::Busy)?;

        let token = CancellationToken::new();
        *service
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(Self { service, token })
    }

    fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self
            .service
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.service.busy.store(false, Ordering::Release);
    }
}
