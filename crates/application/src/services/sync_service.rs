//! Event synchronization service
//!
//! Entry point for the per-request operations: create, update, delete and
//! drift check. Sequences the local store and the remote calendar adapter,
//! applies the ordering rules (local delete before remote delete) and the
//! recovery rules (rebind after a remote re-create).

use std::{fmt, sync::Arc};

use chrono::NaiveDate;
use domain::{CalendarEvent, EventDraft, EventId, RemoteEventId};
use serde::{Deserialize, Serialize};
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{EventStorePort, RemoteCalendarPort},
    request_context::RequestContext,
    routing::CalendarRegistry,
    services::EventLocks,
};

/// Outcome of a read-only drift check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DriftReport {
    /// Local and remote dates agree
    InSync {
        /// The mirrored event's remote identifier
        remote_id: RemoteEventId,
    },
    /// The remote date disagrees with the local date.
    ///
    /// Carries the remote date as reported; the engine never writes it
    /// back silently.
    Drifted {
        /// The mirrored event's remote identifier
        remote_id: RemoteEventId,
        /// The authoritative remote-side date
        remote_date: NaiveDate,
    },
    /// No remote mirror exists: either the event carries no remote
    /// identifier, or the provider no longer knows the identifier it
    /// carries
    NoRemoteEvent,
}

/// Per-event state machine: an event starts unsynced, becomes synced when
/// a remote mirror exists, may be observed drifted when the remote date
/// disagrees, and ends deleted. The service never guards overlapping
/// operations on the same event unless serialization is enabled via
/// [`Self::with_serialized_events`]; the default preserves
/// last-writer-wins semantics.
pub struct EventSyncService {
    store: Arc<dyn EventStorePort>,
    remote: Arc<dyn RemoteCalendarPort>,
    registry: Arc<CalendarRegistry>,
    locks: Option<EventLocks>,
}

impl fmt::Debug for EventSyncService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSyncService").finish_non_exhaustive()
    }
}

impl EventSyncService {
    /// Create a new sync service
    #[must_use]
    pub fn new(
        store: Arc<dyn EventStorePort>,
        remote: Arc<dyn RemoteCalendarPort>,
        registry: Arc<CalendarRegistry>,
    ) -> Self {
        Self {
            store,
            remote,
            registry,
            locks: None,
        }
    }

    /// Serialize operations touching the same event behind a keyed lock.
    ///
    /// Off by default; without it overlapping edits race last-writer-wins.
    #[must_use]
    pub fn with_serialized_events(mut self) -> Self {
        self.locks = Some(EventLocks::new());
        self
    }

    async fn lock_if_enabled(&self, id: EventId) -> Option<OwnedMutexGuard<()>> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(id).await),
            None => None,
        }
    }

    /// Create an event: mirror it remotely, then persist the local record
    /// with the remote identifier the provider assigned.
    ///
    /// # Errors
    ///
    /// Fails on validation, routing or store errors, and on any remote
    /// failure (no partial local record is written in that case).
    #[instrument(skip(self, ctx, draft), fields(request_id = %ctx.request_id(), date = %draft.date))]
    pub async fn create_event(
        &self,
        ctx: &RequestContext,
        draft: &EventDraft,
    ) -> Result<CalendarEvent, ApplicationError> {
        draft.validated()?;
        let routed = self.registry.route(&draft.linked_resource);
        let target = self.registry.target(&routed.calendar)?;

        info!(calendar = %routed.calendar, calendar_target = %target, "Creating calendar event");
        let snapshot = self.remote.create(&target, routed.kind, draft).await?;

        let stored = self
            .store
            .insert(
                &routed.calendar,
                draft,
                Some(snapshot.id.clone()),
                ctx.user_id(),
            )
            .await?;

        info!(event_id = %stored.id, remote_event = %snapshot.id, "Calendar event created");
        Ok(stored)
    }

    /// Update an event: rebuild the remote mirror, then replace the local
    /// record.
    ///
    /// The start/end instants are only recomputed when the incoming date
    /// differs from the stored one. When the provider has lost the remote
    /// event, the adapter re-creates it and the fresh identifier is bound
    /// to the local record.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFoundLocal`] when no local record
    /// exists and [`ApplicationError::ImmutableExternalEvent`] when the
    /// record carries no remote identifier.
    #[instrument(skip(self, ctx, draft), fields(request_id = %ctx.request_id(), event_id = %id))]
    pub async fn update_event(
        &self,
        ctx: &RequestContext,
        id: EventId,
        draft: &EventDraft,
    ) -> Result<CalendarEvent, ApplicationError> {
        draft.validated()?;
        let _guard = self.lock_if_enabled(id).await;

        let existing = self
            .store
            .get(&id)
            .await?
            .ok_or(ApplicationError::NotFoundLocal(id))?;
        let remote_id = existing
            .remote_id
            .clone()
            .ok_or(ApplicationError::ImmutableExternalEvent(id))?;

        // Routing is re-derived from the incoming linkage, as on create.
        let routed = self.registry.route(&draft.linked_resource);
        let target = self.registry.target(&routed.calendar)?;
        let reschedule = draft.date != existing.date;

        debug!(calendar_target = %target, reschedule, "Updating calendar event");
        let outcome = self
            .remote
            .update(&target, &remote_id, routed.kind, draft, reschedule)
            .await?;

        if outcome.was_recreated() {
            info!(
                event_id = %id,
                stale_remote_event = %remote_id,
                "Remote event had vanished; re-created and rebinding its identifier"
            );
        }
        let snapshot = outcome.into_snapshot();

        let stored = self
            .store
            .update(
                &id,
                &routed.calendar,
                draft,
                Some(snapshot.id),
                ctx.user_id(),
            )
            .await?;

        info!(event_id = %stored.id, "Calendar event updated");
        Ok(stored)
    }

    /// Delete an event locally and, best-effort, its remote mirror.
    ///
    /// The local record is removed first so downstream consumers of the
    /// store observe the deletion regardless of remote latency or
    /// failure. Remote failures after that point are logged and
    /// swallowed. Deleting an unknown identifier is a no-op success.
    ///
    /// # Errors
    ///
    /// Fails only on store errors.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id(), event_id = %id))]
    pub async fn delete_event(
        &self,
        ctx: &RequestContext,
        id: EventId,
    ) -> Result<(), ApplicationError> {
        let _guard = self.lock_if_enabled(id).await;

        let Some(existing) = self.store.get(&id).await? else {
            debug!("No local record; nothing to delete");
            return Ok(());
        };

        // Local removal comes first, unconditionally.
        self.store.delete(&id).await?;
        info!(calendar = %existing.calendar, "Local calendar event deleted");

        if let Some(remote_id) = existing.remote_id {
            match self.registry.target(&existing.calendar) {
                Ok(target) => {
                    if let Err(e) = self.remote.delete(&target, &remote_id).await {
                        warn!(
                            remote_event = %remote_id,
                            calendar_target = %target,
                            error = %e,
                            "Remote delete failed after local removal; the mirrored event may need manual cleanup"
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        remote_event = %remote_id,
                        error = %e,
                        "No remote calendar target for deleted event; the mirrored event may need manual cleanup"
                    );
                },
            }
        }

        Ok(())
    }

    /// Compare the local record against the remote mirror without writing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFoundLocal`] when no local record
    /// exists, and [`ApplicationError::MissingCalendarLink`] when the
    /// record's calendar cannot be addressed remotely - distinct from the
    /// [`DriftReport::NoRemoteEvent`] outcome.
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn check_drift(&self, id: EventId) -> Result<DriftReport, ApplicationError> {
        let existing = self
            .store
            .get(&id)
            .await?
            .ok_or(ApplicationError::NotFoundLocal(id))?;

        let Some(remote_id) = existing.remote_id.clone() else {
            debug!("Event carries no remote identifier");
            return Ok(DriftReport::NoRemoteEvent);
        };

        let target = self.registry.target(&existing.calendar)?;
        let Some(snapshot) = self.remote.get(&target, &remote_id).await? else {
            debug!(remote_event = %remote_id, "Remote event no longer exists");
            return Ok(DriftReport::NoRemoteEvent);
        };

        if snapshot.date == existing.date {
            Ok(DriftReport::InSync { remote_id })
        } else {
            info!(
                local_date = %existing.date,
                remote_date = %snapshot.date,
                "Drift detected between local record and remote event"
            );
            Ok(DriftReport::Drifted {
                remote_id,
                remote_date: snapshot.date,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use domain::{
        CalendarKind, CalendarUri, LinkedResource, RemoteCalendarId, UserId,
    };
    use mockall::Sequence;

    use super::*;
    use crate::ports::{
        CalendarTarget, MockEventStorePort, MockRemoteCalendarPort, RemoteCalendarError,
        RemoteEventSnapshot, RemoteUpdateOutcome,
    };

    fn visit_uri() -> CalendarUri {
        CalendarUri::new("https://data.example.org/calendars/visits").unwrap()
    }

    fn planning_uri() -> CalendarUri {
        CalendarUri::new("https://data.example.org/calendars/planning").unwrap()
    }

    fn registry() -> Arc<CalendarRegistry> {
        let mut remote_ids = HashMap::new();
        remote_ids.insert(
            visit_uri(),
            RemoteCalendarId::new("visits@example.org").unwrap(),
        );
        remote_ids.insert(
            planning_uri(),
            RemoteCalendarId::new("planning@example.org").unwrap(),
        );
        Arc::new(CalendarRegistry::new(
            visit_uri(),
            planning_uri(),
            false,
            remote_ids,
        ))
    }

    fn unmapped_registry() -> Arc<CalendarRegistry> {
        Arc::new(CalendarRegistry::new(
            visit_uri(),
            planning_uri(),
            false,
            HashMap::new(),
        ))
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn visit_draft() -> EventDraft {
        EventDraft::new(
            "Site survey",
            march(1),
            LinkedResource::VisitRequest("https://data.example.org/requests/42".to_string()),
        )
    }

    fn order_draft() -> EventDraft {
        EventDraft::new(
            "Install frames",
            march(1),
            LinkedResource::Order("https://data.example.org/orders/9".to_string()),
        )
    }

    fn snapshot(id: &str, date: NaiveDate) -> RemoteEventSnapshot {
        RemoteEventSnapshot {
            id: RemoteEventId::new(id).unwrap(),
            date,
        }
    }

    fn stored_event(
        id: EventId,
        draft: &EventDraft,
        calendar: CalendarUri,
        remote_id: Option<RemoteEventId>,
    ) -> CalendarEvent {
        let now = Utc::now();
        let user = UserId::new();
        CalendarEvent {
            id,
            uri: format!("https://data.example.org/calendar-events/{id}"),
            subject: draft.subject.clone(),
            date: draft.date,
            description: draft.description.clone(),
            url: draft.url.clone(),
            location: draft.location.clone(),
            linked_resource: draft.linked_resource.clone(),
            calendar,
            remote_id,
            origin: Some("calendar-mirror".to_string()),
            created_by: user,
            modified_by: user,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(
        store: MockEventStorePort,
        remote: MockRemoteCalendarPort,
        registry: Arc<CalendarRegistry>,
    ) -> EventSyncService {
        EventSyncService::new(Arc::new(store), Arc::new(remote), registry)
    }

    #[tokio::test]
    async fn create_persists_the_remote_identifier_from_the_adapter() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();

        remote
            .expect_create()
            .times(1)
            .returning(|_, _, draft| Ok(snapshot("AAMk-new", draft.date)));
        store
            .expect_insert()
            .withf(|_, _, remote_id, _| {
                remote_id.as_ref().map(RemoteEventId::as_str) == Some("AAMk-new")
            })
            .times(1)
            .returning(|calendar, draft, remote_id, _| {
                Ok(stored_event(
                    EventId::new(),
                    draft,
                    calendar.clone(),
                    remote_id,
                ))
            });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let created = service.create_event(&ctx, &visit_draft()).await.unwrap();

        assert_eq!(created.remote_id.unwrap().as_str(), "AAMk-new");
    }

    #[tokio::test]
    async fn create_routes_visit_requests_to_the_visit_calendar() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();

        remote
            .expect_create()
            .withf(|target, kind, _| {
                *kind == CalendarKind::CustomerVisit
                    && *target
                        == CalendarTarget::Named(
                            RemoteCalendarId::new("visits@example.org").unwrap(),
                        )
            })
            .times(1)
            .returning(|_, _, draft| Ok(snapshot("AAMk-1", draft.date)));
        store
            .expect_insert()
            .withf(|calendar, _, _, _| calendar.as_str().ends_with("/visits"))
            .times(1)
            .returning(|calendar, draft, remote_id, _| {
                Ok(stored_event(
                    EventId::new(),
                    draft,
                    calendar.clone(),
                    remote_id,
                ))
            });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        service.create_event(&ctx, &visit_draft()).await.unwrap();
    }

    #[tokio::test]
    async fn create_routes_orders_to_the_planning_calendar() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();

        remote
            .expect_create()
            .withf(|target, kind, _| {
                *kind == CalendarKind::Planning
                    && *target
                        == CalendarTarget::Named(
                            RemoteCalendarId::new("planning@example.org").unwrap(),
                        )
            })
            .times(1)
            .returning(|_, _, draft| Ok(snapshot("AAMk-2", draft.date)));
        store
            .expect_insert()
            .withf(|calendar, _, _, _| calendar.as_str().ends_with("/planning"))
            .times(1)
            .returning(|calendar, draft, remote_id, _| {
                Ok(stored_event(
                    EventId::new(),
                    draft,
                    calendar.clone(),
                    remote_id,
                ))
            });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        service.create_event(&ctx, &order_draft()).await.unwrap();
    }

    #[tokio::test]
    async fn create_with_unmapped_calendar_fails_before_any_remote_call() {
        let store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();

        let service = service(store, remote, unmapped_registry());
        let ctx = RequestContext::new(UserId::new());
        let err = service.create_event(&ctx, &visit_draft()).await.unwrap_err();

        assert!(matches!(err, ApplicationError::MissingCalendarLink(_)));
    }

    #[tokio::test]
    async fn create_propagates_remote_failure_without_writing_locally() {
        let store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();

        remote.expect_create().times(1).returning(|_, _, _| {
            Err(RemoteCalendarError::ServiceUnavailable("HTTP 503".to_string()))
        });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let err = service.create_event(&ctx, &visit_draft()).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Remote(_)));
    }

    #[tokio::test]
    async fn create_rejects_an_invalid_draft() {
        let store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();

        let mut draft = visit_draft();
        draft.subject = String::new();

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let err = service.create_event(&ctx, &draft).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn update_with_unchanged_date_sends_no_reschedule() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        remote
            .expect_update()
            .withf(|_, _, _, _, reschedule| !*reschedule)
            .times(1)
            .returning(|_, remote_id, _, draft, _| {
                Ok(RemoteUpdateOutcome::Updated(RemoteEventSnapshot {
                    id: remote_id.clone(),
                    date: draft.date,
                }))
            });
        store
            .expect_update()
            .times(1)
            .returning(|id, calendar, draft, remote_id, _| {
                Ok(stored_event(*id, draft, calendar.clone(), remote_id))
            });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        // Same date as the stored record: content-only update.
        let draft = visit_draft().with_description("Bring the ladder");
        service.update_event(&ctx, id, &draft).await.unwrap();
    }

    #[tokio::test]
    async fn update_with_changed_date_requests_a_reschedule() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        remote
            .expect_update()
            .withf(|_, _, _, _, reschedule| *reschedule)
            .times(1)
            .returning(|_, remote_id, _, draft, _| {
                Ok(RemoteUpdateOutcome::Updated(RemoteEventSnapshot {
                    id: remote_id.clone(),
                    date: draft.date,
                }))
            });
        store
            .expect_update()
            .times(1)
            .returning(|id, calendar, draft, remote_id, _| {
                Ok(stored_event(*id, draft, calendar.clone(), remote_id))
            });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let mut draft = visit_draft();
        draft.date = march(8);
        service.update_event(&ctx, id, &draft).await.unwrap();
    }

    #[tokio::test]
    async fn update_rebinds_the_identifier_after_a_remote_recreate() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-stale").unwrap()),
            )))
        });
        remote.expect_update().times(1).returning(|_, _, _, draft, _| {
            Ok(RemoteUpdateOutcome::Recreated(snapshot(
                "AAMk-fresh",
                draft.date,
            )))
        });
        store
            .expect_update()
            .withf(|_, _, _, remote_id, _| {
                remote_id.as_ref().map(RemoteEventId::as_str) == Some("AAMk-fresh")
            })
            .times(1)
            .returning(|id, calendar, draft, remote_id, _| {
                Ok(stored_event(*id, draft, calendar.clone(), remote_id))
            });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let updated = service
            .update_event(&ctx, id, &visit_draft())
            .await
            .unwrap();

        assert_eq!(updated.remote_id.unwrap().as_str(), "AAMk-fresh");
    }

    #[tokio::test]
    async fn update_without_remote_identifier_is_an_immutable_conflict() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(stored_event(id, &visit_draft(), visit_uri(), None))));

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let err = service
            .update_event(&ctx, id, &visit_draft())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ImmutableExternalEvent(got) if got == id));
    }

    #[tokio::test]
    async fn update_of_a_missing_event_is_not_found() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();

        store.expect_get().times(1).returning(|_| Ok(None));

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        let err = service
            .update_event(&ctx, EventId::new(), &visit_draft())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_the_local_record_before_the_remote_call() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();
        let mut seq = Sequence::new();

        store
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| {
                Ok(Some(stored_event(
                    id,
                    &visit_draft(),
                    visit_uri(),
                    Some(RemoteEventId::new("AAMk-1").unwrap()),
                )))
            });
        store
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        remote
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        service.delete_event(&ctx, id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_a_missing_event_is_a_noop_success() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();

        store.expect_get().times(1).returning(|_| Ok(None));
        // No store.delete and no remote.delete expectations: neither may run.

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        service.delete_event(&ctx, EventId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn delete_swallows_remote_failures() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        store.expect_delete().times(1).returning(|_| Ok(()));
        remote.expect_delete().times(1).returning(|_, _| {
            Err(RemoteCalendarError::ServiceUnavailable("HTTP 500".to_string()))
        });

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        // The local record is already gone, so the failure must not surface.
        service.delete_event(&ctx, id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_an_unsynced_event_skips_the_remote_call() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(stored_event(id, &visit_draft(), visit_uri(), None))));
        store.expect_delete().times(1).returning(|_| Ok(()));

        let service = service(store, remote, registry());
        let ctx = RequestContext::new(UserId::new());
        service.delete_event(&ctx, id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_with_an_unmapped_calendar_still_succeeds() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        store.expect_delete().times(1).returning(|_| Ok(()));

        let service = service(store, remote, unmapped_registry());
        let ctx = RequestContext::new(UserId::new());
        service.delete_event(&ctx, id).await.unwrap();
    }

    #[tokio::test]
    async fn drift_check_with_equal_dates_is_in_sync() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        remote
            .expect_get()
            .times(1)
            .returning(|_, remote_id| {
                Ok(Some(RemoteEventSnapshot {
                    id: remote_id.clone(),
                    date: march(1),
                }))
            });

        let service = service(store, remote, registry());
        let report = service.check_drift(id).await.unwrap();

        assert_eq!(
            report,
            DriftReport::InSync {
                remote_id: RemoteEventId::new("AAMk-1").unwrap()
            }
        );
    }

    #[tokio::test]
    async fn drift_check_reports_the_remote_date_on_disagreement() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        remote
            .expect_get()
            .times(1)
            .returning(|_, remote_id| {
                Ok(Some(RemoteEventSnapshot {
                    id: remote_id.clone(),
                    date: march(2),
                }))
            });

        let service = service(store, remote, registry());
        let report = service.check_drift(id).await.unwrap();

        assert_eq!(
            report,
            DriftReport::Drifted {
                remote_id: RemoteEventId::new("AAMk-1").unwrap(),
                remote_date: march(2),
            }
        );
    }

    #[tokio::test]
    async fn drift_check_without_remote_identifier_reports_no_remote_event() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(stored_event(id, &visit_draft(), visit_uri(), None))));

        let service = service(store, remote, registry());
        let report = service.check_drift(id).await.unwrap();

        assert_eq!(report, DriftReport::NoRemoteEvent);
    }

    #[tokio::test]
    async fn drift_check_with_a_vanished_remote_event_reports_no_remote_event() {
        let mut store = MockEventStorePort::new();
        let mut remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });
        remote.expect_get().times(1).returning(|_, _| Ok(None));

        let service = service(store, remote, registry());
        let report = service.check_drift(id).await.unwrap();

        assert_eq!(report, DriftReport::NoRemoteEvent);
    }

    #[tokio::test]
    async fn drift_check_distinguishes_a_missing_calendar_link() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();
        let id = EventId::new();

        store.expect_get().times(1).returning(move |_| {
            Ok(Some(stored_event(
                id,
                &visit_draft(),
                visit_uri(),
                Some(RemoteEventId::new("AAMk-1").unwrap()),
            )))
        });

        let service = service(store, remote, unmapped_registry());
        let err = service.check_drift(id).await.unwrap_err();

        assert!(matches!(err, ApplicationError::MissingCalendarLink(_)));
    }

    #[tokio::test]
    async fn drift_check_of_a_missing_event_is_not_found() {
        let mut store = MockEventStorePort::new();
        let remote = MockRemoteCalendarPort::new();

        store.expect_get().times(1).returning(|_| Ok(None));

        let service = service(store, remote, registry());
        let err = service.check_drift(EventId::new()).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn drift_report_serializes_with_a_status_tag() {
        let report = DriftReport::Drifted {
            remote_id: RemoteEventId::new("AAMk-1").unwrap(),
            remote_date: march(2),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "drifted");
        assert_eq!(json["remote_id"], "AAMk-1");
        assert_eq!(json["remote_date"], "2024-03-02");

        let no_remote = serde_json::to_value(DriftReport::NoRemoteEvent).unwrap();
        assert_eq!(no_remote["status"], "no_remote_event");
    }
}
