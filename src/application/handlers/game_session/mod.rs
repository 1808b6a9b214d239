//! Game session command and query handlers.

mod add_participant;
mod change_status;
mod create_game_session;
mod delete_game_session;
mod get_game_session;
mod get_session_log;
mod join_game_session;
mod leave_game_session;
mod list_game_sessions;
mod record_game_event;
mod remove_participant;
mod send_chat_message;
mod set_active_encounter;
mod set_active_scene;
mod support;
mod update_game_session;

pub use add_participant::{AddParticipantCommand, AddParticipantHandler};
pub use change_status::{
    ChangeGameSessionStatusCommand, ChangeGameSessionStatusHandler, ChangeGameSessionStatusResult,
    StatusAction,
};
pub use create_game_session::{
    CreateGameSessionCommand, CreateGameSessionHandler, CreateGameSessionResult,
};
pub use delete_game_session::{DeleteGameSessionCommand, DeleteGameSessionHandler};
pub use get_game_session::{GetGameSessionHandler, GetGameSessionQuery};
pub use get_session_log::{GetSessionLogHandler, GetSessionLogQuery};
pub use join_game_session::{
    JoinGameSessionCommand, JoinGameSessionHandler, JoinGameSessionResult,
};
pub use leave_game_session::{LeaveGameSessionCommand, LeaveGameSessionHandler};
pub use list_game_sessions::{ListGameSessionsHandler, ListGameSessionsQuery};
pub use record_game_event::{RecordGameEventCommand, RecordGameEventHandler};
pub use remove_participant::{RemoveParticipantCommand, RemoveParticipantHandler};
pub use send_chat_message::{SendChatMessageCommand, SendChatMessageHandler};
pub use set_active_encounter::{SetActiveEncounterCommand, SetActiveEncounterHandler};
pub use set_active_scene::{SetActiveSceneCommand, SetActiveSceneHandler};
pub use update_game_session::{
    UpdateGameSessionCommand, UpdateGameSessionHandler, UpdateGameSessionResult,
};
