//! Integration tests for game sessions and schedules through the public API.
//!
//! Covers the end-to-end flow:
//! 1. A schedule is created and the materializer turns it into sessions
//! 2. Players join, the master starts the session, chat and events are logged
//! 3. Deleting the schedule leaves every generated session in place
//!
//! Uses the in-memory adapters throughout.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;

use vtt_game::adapters::{
    InMemoryContentCatalog, InMemoryEventBus, InMemoryGameSessionRepository,
    InMemoryScheduleRepository,
};
use vtt_game::application::handlers::{
    ChangeGameSessionStatusCommand, ChangeGameSessionStatusHandler, CreateGameSessionCommand,
    CreateGameSessionHandler, CreateScheduleCommand, CreateScheduleHandler,
    DeleteScheduleCommand, DeleteScheduleHandler, GetSessionLogHandler, GetSessionLogQuery,
    JoinGameSessionCommand, JoinGameSessionHandler, ListUpcomingSchedulesHandler,
    ListUpcomingSchedulesQuery, RecordGameEventCommand, RecordGameEventHandler,
    RemoveParticipantCommand, RemoveParticipantHandler, SendChatMessageCommand,
    SendChatMessageHandler,
};
use vtt_game::application::{ScheduleMaterializer, ScheduleMaterializerConfig};
use vtt_game::domain::foundation::{
    CommandMetadata, GameSessionId, GameSessionStatus, Timestamp, UserId,
};
use vtt_game::domain::game_session::{
    GameSessionError, LogEntry, MessageType, Participant, PlayerType,
};
use vtt_game::domain::schedule::{Frequency, Recurrence, ScheduleError};
use vtt_game::ports::GameSessionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn as_user(id: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(id).unwrap())
}

struct World {
    sessions: Arc<InMemoryGameSessionRepository>,
    schedules: Arc<InMemoryScheduleRepository>,
    catalog: Arc<InMemoryContentCatalog>,
    bus: Arc<InMemoryEventBus>,
}

impl World {
    fn new() -> Self {
        Self {
            sessions: Arc::new(InMemoryGameSessionRepository::new()),
            schedules: Arc::new(InMemoryScheduleRepository::new()),
            catalog: Arc::new(InMemoryContentCatalog::new()),
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    async fn running_session(&self) -> GameSessionId {
        let created = CreateGameSessionHandler::new(
            self.sessions.clone(),
            self.catalog.clone(),
            self.bus.clone(),
        )
        .handle(
            CreateGameSessionCommand {
                title: "Lost Mine".to_string(),
                scene_id: None,
                encounter_id: None,
            },
            as_user("gm"),
        )
        .await
        .unwrap();
        let id = *created.session.id();

        JoinGameSessionHandler::new(self.sessions.clone(), self.bus.clone())
            .handle(
                JoinGameSessionCommand {
                    session_id: id,
                    player_type: PlayerType::Player,
                },
                as_user("alice"),
            )
            .await
            .unwrap();

        ChangeGameSessionStatusHandler::new(self.sessions.clone(), self.bus.clone())
            .handle(ChangeGameSessionStatusCommand::start(id), as_user("gm"))
            .await
            .unwrap();
        id
    }

    fn chat(&self) -> SendChatMessageHandler {
        SendChatMessageHandler::new(self.sessions.clone(), self.bus.clone())
    }
}

// =============================================================================
// Session lifecycle and log
// =============================================================================

#[tokio::test]
async fn running_session_collects_a_merged_log() {
    let world = World::new();
    let id = world.running_session().await;

    world
        .chat()
        .handle(
            SendChatMessageCommand {
                session_id: id,
                message_type: MessageType::Chat,
                content: "I search the room".to_string(),
            },
            as_user("alice"),
        )
        .await
        .unwrap();
    RecordGameEventHandler::new(world.sessions.clone(), world.bus.clone())
        .handle(
            RecordGameEventCommand {
                session_id: id,
                event_type: "dice_roll".to_string(),
                payload: json!({ "expression": "1d20", "total": 17 }),
            },
            as_user("gm"),
        )
        .await
        .unwrap();

    let log = GetSessionLogHandler::new(world.sessions.clone())
        .handle(GetSessionLogQuery {
            session_id: id,
            user_id: UserId::new("alice").unwrap(),
            since: None,
        })
        .await
        .unwrap();

    assert_eq!(log.len(), 2);
    assert!(matches!(log[0], LogEntry::Message(_)));
    assert!(matches!(log[1], LogEntry::Event(_)));
    assert!(world.bus.has_event("game_session.message_sent.v1"));
}

#[tokio::test]
async fn empty_message_fails_in_any_status() {
    let world = World::new();
    let id = world.running_session().await;
    let status = ChangeGameSessionStatusHandler::new(world.sessions.clone(), world.bus.clone());

    for next in [
        None,
        Some(ChangeGameSessionStatusCommand::pause(id)),
        Some(ChangeGameSessionStatusCommand::finish(id)),
    ] {
        if let Some(cmd) = next {
            status.handle(cmd, as_user("gm")).await.unwrap();
        }
        let err = world
            .chat()
            .handle(
                SendChatMessageCommand {
                    session_id: id,
                    message_type: MessageType::Chat,
                    content: "   ".to_string(),
                },
                as_user("alice"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GameSessionError::ValidationFailed { .. }));
    }
}

#[tokio::test]
async fn messages_are_rejected_once_finished() {
    let world = World::new();
    let id = world.running_session().await;
    ChangeGameSessionStatusHandler::new(world.sessions.clone(), world.bus.clone())
        .handle(ChangeGameSessionStatusCommand::finish(id), as_user("gm"))
        .await
        .unwrap();

    let err = world
        .chat()
        .handle(
            SendChatMessageCommand {
                session_id: id,
                message_type: MessageType::Chat,
                content: "Anyone there?".to_string(),
            },
            as_user("alice"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GameSessionError::InvalidState(_)));
    let stored = world.sessions.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), GameSessionStatus::Finished);
}

#[tokio::test]
async fn master_cannot_be_removed_by_anyone() {
    let world = World::new();
    let id = world.running_session().await;
    let handler = RemoveParticipantHandler::new(world.sessions.clone(), world.bus.clone());

    for caller in ["gm", "alice", "mallory"] {
        let result = handler
            .handle(
                RemoveParticipantCommand {
                    session_id: id,
                    user_id: UserId::new("gm").unwrap(),
                },
                as_user(caller),
            )
            .await;
        assert!(result.is_err(), "caller {caller} removed the master");
    }

    let stored = world.sessions.find_by_id(&id).await.unwrap().unwrap();
    assert!(stored.is_master(&UserId::new("gm").unwrap()));
}

// =============================================================================
// Schedules
// =============================================================================

#[tokio::test]
async fn schedule_to_sessions_and_back() {
    let world = World::new();
    let start = Timestamp::now().plus_minutes(60).unwrap();
    let schedule = CreateScheduleHandler::new(world.schedules.clone(), world.bus.clone())
        .handle(
            CreateScheduleCommand {
                title: "Weekly raid".to_string(),
                calendar_event_id: None,
                start,
                duration_minutes: 180,
                recurrence: Some(Recurrence::new(Frequency::Daily, 1)),
                participants: vec![
                    Participant::master(UserId::new("gm").unwrap()),
                    Participant::new(UserId::new("alice").unwrap(), PlayerType::Player),
                ],
            },
            as_user("gm"),
        )
        .await
        .unwrap();

    let upcoming = ListUpcomingSchedulesHandler::new(world.schedules.clone())
        .handle(ListUpcomingSchedulesQuery {
            user_id: UserId::new("gm").unwrap(),
            start,
            end: start.add_days(1).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 1);

    let materializer = ScheduleMaterializer::with_config(
        world.schedules.clone(),
        world.sessions.clone(),
        world.bus.clone(),
        ScheduleMaterializerConfig::default()
            .with_poll_interval(Duration::from_millis(10))
            .with_horizon_days(3),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(async move { materializer.run(shutdown_rx).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown_tx.send(true).unwrap();
    worker.await.unwrap();

    let generated = world.sessions.find_by_schedule_id(schedule.id()).await.unwrap();
    assert!(!generated.is_empty());
    assert!(generated
        .iter()
        .all(|s| s.status() == GameSessionStatus::Scheduled));

    let deleted = DeleteScheduleHandler::new(
        world.schedules.clone(),
        world.sessions.clone(),
        world.bus.clone(),
    )
    .handle(
        DeleteScheduleCommand {
            schedule_id: *schedule.id(),
        },
        as_user("gm"),
    )
    .await
    .unwrap();

    assert_eq!(deleted.retained_sessions, generated.len());
    assert_eq!(world.sessions.len().await, generated.len());
}

#[tokio::test]
async fn upcoming_window_must_move_forward() {
    let world = World::new();
    let now = Timestamp::now();

    let err = ListUpcomingSchedulesHandler::new(world.schedules.clone())
        .handle(ListUpcomingSchedulesQuery {
            user_id: UserId::new("gm").unwrap(),
            start: now,
            end: now,
        })
        .await
        .unwrap_err();

    assert_eq!(err, ScheduleError::invalid("End date must be after start date"));
}
