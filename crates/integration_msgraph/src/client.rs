//! Graph calendar client
//!
//! Executes event operations against the Graph API on behalf of a user.
//! "Not found" responses are normalized into the port's result variants:
//! `get` yields `None`, `update` re-creates the event, `delete` treats it
//! as already done.

use std::sync::Arc;

use application::{
    CalendarTarget, RemoteCalendarError, RemoteCalendarPort, RemoteEventSnapshot,
    RemoteUpdateOutcome,
};
use async_trait::async_trait;
use domain::{CalendarKind, EventDraft, RemoteEventId};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, instrument};

use crate::auth::AccessTokenProvider;
use crate::config::GraphConfig;
use crate::payload::{GraphEventResource, build_payload};

/// HTTP client for the Graph-shaped calendar API
pub struct GraphCalendarClient {
    http: Client,
    config: GraphConfig,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl std::fmt::Debug for GraphCalendarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCalendarClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl GraphCalendarClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(
        config: GraphConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, RemoteCalendarError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteCalendarError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// The events collection URL for a calendar target
    fn events_url(&self, target: &CalendarTarget) -> String {
        match target {
            CalendarTarget::Named(id) => {
                format!("{}/users/{id}/calendar/events", self.config.base_url)
            },
            CalendarTarget::CurrentUser => format!("{}/me/calendar/events", self.config.base_url),
        }
    }

    /// The URL of one event under a calendar target
    fn event_url(&self, target: &CalendarTarget, remote_id: &RemoteEventId) -> String {
        format!("{}/{}", self.events_url(target), remote_id.as_str())
    }

    async fn bearer_token(&self) -> Result<String, RemoteCalendarError> {
        self.tokens
            .access_token()
            .await
            .map_err(|_| RemoteCalendarError::Unauthorized)
    }

    /// Map a non-success status to a port error; 404 is handled per call
    fn classify_failure(status: StatusCode) -> RemoteCalendarError {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            RemoteCalendarError::Unauthorized
        } else if status.is_server_error() {
            RemoteCalendarError::ServiceUnavailable(format!("HTTP {status}"))
        } else {
            RemoteCalendarError::RequestFailed(format!("HTTP {status}"))
        }
    }

    async fn parse_event(response: Response) -> Result<RemoteEventSnapshot, RemoteCalendarError> {
        let resource: GraphEventResource = response
            .json()
            .await
            .map_err(|e| RemoteCalendarError::ParseError(e.to_string()))?;
        resource.into_snapshot()
    }

    /// POST a fresh event under the target calendar
    async fn post_event(
        &self,
        target: &CalendarTarget,
        kind: CalendarKind,
        draft: &EventDraft,
    ) -> Result<RemoteEventSnapshot, RemoteCalendarError> {
        // A fresh event always needs its time slot, so the schedule is
        // included regardless of what triggered the create.
        let payload = build_payload(&self.config, kind, draft, true);
        let token = self.bearer_token().await?;

        let response = self
            .http
            .post(self.events_url(target))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RemoteCalendarError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status));
        }
        Self::parse_event(response).await
    }
}

#[async_trait]
impl RemoteCalendarPort for GraphCalendarClient {
    #[instrument(skip(self, draft), fields(calendar_target = %target, date = %draft.date))]
    async fn create(
        &self,
        target: &CalendarTarget,
        kind: CalendarKind,
        draft: &EventDraft,
    ) -> Result<RemoteEventSnapshot, RemoteCalendarError> {
        info!("Creating remote calendar event");
        self.post_event(target, kind, draft).await
    }

    #[instrument(skip(self), fields(calendar_target = %target, remote_event = %remote_id))]
    async fn get(
        &self,
        target: &CalendarTarget,
        remote_id: &RemoteEventId,
    ) -> Result<Option<RemoteEventSnapshot>, RemoteCalendarError> {
        let token = self.bearer_token().await?;
        let response = self
            .http
            .get(self.event_url(target, remote_id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RemoteCalendarError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Remote event not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::classify_failure(status));
        }
        Ok(Some(Self::parse_event(response).await?))
    }

    #[instrument(skip(self, draft), fields(calendar_target = %target, remote_event = %remote_id, reschedule))]
    async fn update(
        &self,
        target: &CalendarTarget,
        remote_id: &RemoteEventId,
        kind: CalendarKind,
        draft: &EventDraft,
        reschedule: bool,
    ) -> Result<RemoteUpdateOutcome, RemoteCalendarError> {
        info!("Updating remote calendar event");
        let payload = build_payload(&self.config, kind, draft, reschedule);
        let token = self.bearer_token().await?;

        let response = self
            .http
            .patch(self.event_url(target, remote_id))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RemoteCalendarError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("Remote event vanished; creating a replacement");
            let snapshot = self.post_event(target, kind, draft).await?;
            return Ok(RemoteUpdateOutcome::Recreated(snapshot));
        }
        if !status.is_success() {
            return Err(Self::classify_failure(status));
        }
        Ok(RemoteUpdateOutcome::Updated(Self::parse_event(response).await?))
    }

    #[instrument(skip(self), fields(calendar_target = %target, remote_event = %remote_id))]
    async fn delete(
        &self,
        target: &CalendarTarget,
        remote_id: &RemoteEventId,
    ) -> Result<(), RemoteCalendarError> {
        info!("Deleting remote calendar event");
        let token = self.bearer_token().await?;
        let response = self
            .http
            .delete(self.event_url(target, remote_id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RemoteCalendarError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Remote event already gone; nothing to delete");
            return Ok(());
        }
        if !status.is_success() {
            return Err(Self::classify_failure(status));
        }
        Ok(())
    }
}
