//! GenerateSessionsHandler - Materialize schedule occurrences as sessions.
//!
//! Each occurrence becomes a `Scheduled` game session seated with the
//! schedule's participants. Dates that already have a session for the
//! schedule are skipped, so the handler is safe to run repeatedly.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{
    CommandMetadata, EventId, GameSessionId, OwnedByUser, ScheduleId, Timestamp,
};
use crate::domain::game_session::{GameSession, GameSessionCreated};
use crate::domain::schedule::{ScheduleError, SessionsGenerated};
use crate::ports::{EventPublisher, GameSessionRepository, ScheduleRepository};

use super::support::{load_owned, publish};

/// Upper bound on occurrences considered in one run.
pub const MAX_GENERATED_OCCURRENCES: usize = 366;

#[derive(Debug, Clone)]
pub struct GenerateSessionsCommand {
    pub schedule_id: ScheduleId,
    /// Skip occurrences before this instant.
    pub from: Option<Timestamp>,
    /// Ignore occurrences after this instant. Required for unbounded rules.
    pub horizon: Option<Timestamp>,
}

impl GenerateSessionsCommand {
    pub fn new(schedule_id: ScheduleId) -> Self {
        Self {
            schedule_id,
            from: None,
            horizon: None,
        }
    }

    pub fn starting_at(mut self, from: Timestamp) -> Self {
        self.from = Some(from);
        self
    }

    pub fn up_to(mut self, horizon: Timestamp) -> Self {
        self.horizon = Some(horizon);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerateSessionsResult {
    /// Sessions created by this run, in occurrence order.
    pub sessions: Vec<GameSession>,
    /// Occurrences skipped because their date already had a session.
    pub skipped: usize,
}

pub struct GenerateSessionsHandler {
    schedules: Arc<dyn ScheduleRepository>,
    sessions: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl GenerateSessionsHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            schedules,
            sessions,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateSessionsCommand,
        metadata: CommandMetadata,
    ) -> Result<GenerateSessionsResult, ScheduleError> {
        let schedule = load_owned(
            self.schedules.as_ref(),
            cmd.schedule_id,
            &metadata.user_id,
            "Only the schedule owner can generate sessions",
        )
        .await?;

        if !schedule.is_bounded() && cmd.horizon.is_none() {
            return Err(ScheduleError::invalid(
                "A recurrence without count or until needs a generation horizon",
            ));
        }

        let within_horizon = |t: &Timestamp| cmd.horizon.map_or(true, |h| !t.is_after(&h));
        let occurrences: Vec<Timestamp> = match cmd.from {
            Some(from) => schedule
                .occurrences_from(from)
                .take_while(within_horizon)
                .take(MAX_GENERATED_OCCURRENCES)
                .collect(),
            None => schedule
                .occurrences()
                .take_while(within_horizon)
                .take(MAX_GENERATED_OCCURRENCES)
                .collect(),
        };

        let mut taken_dates: HashSet<_> = self
            .sessions
            .find_by_schedule_id(&cmd.schedule_id)
            .await?
            .iter()
            .filter_map(|s| s.starts_at())
            .map(|t| t.date())
            .collect();

        let mut created = Vec::new();
        let mut skipped = 0;
        for starts_at in occurrences {
            if !taken_dates.insert(starts_at.date()) {
                skipped += 1;
                continue;
            }
            let session = GameSession::from_schedule(
                GameSessionId::new(),
                schedule.owner_id().clone(),
                schedule.title(),
                cmd.schedule_id,
                starts_at,
                schedule.participants(),
            )?;
            if let Err(e) = self.sessions.save(&session).await {
                if !created.is_empty() {
                    warn!(
                        schedule_id = %cmd.schedule_id,
                        created = created.len(),
                        error = %e,
                        "Session generation stopped partway"
                    );
                }
                return Err(e.into());
            }

            let event = GameSessionCreated {
                event_id: EventId::new(),
                session_id: *session.id(),
                owner_id: schedule.owner_id().clone(),
                title: session.title().to_string(),
                status: session.status(),
                schedule_id: Some(cmd.schedule_id),
                created_at: *session.created_at(),
            };
            publish(self.event_publisher.as_ref(), &event, &metadata).await?;
            created.push(session);
        }

        if created.is_empty() {
            debug!(schedule_id = %cmd.schedule_id, skipped, "No new sessions to generate");
            return Ok(GenerateSessionsResult {
                sessions: created,
                skipped,
            });
        }

        let event = SessionsGenerated {
            event_id: EventId::new(),
            schedule_id: cmd.schedule_id,
            session_ids: created.iter().map(|s| *s.id()).collect(),
            occurrences: created.iter().filter_map(|s| s.starts_at()).collect(),
            generated_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            schedule_id = %cmd.schedule_id,
            created = created.len(),
            skipped,
            source = metadata.source().unwrap_or("api"),
            "Sessions generated from schedule"
        );
        Ok(GenerateSessionsResult {
            sessions: created,
            skipped,
        })
    }
}
