//! Shared Types Module
//!
//! App view states and the messages background requests send back to the UI
//! thread.

use crate::api::ApiError;
use crate::board_view::Notification;
use crate::shared::models::User;

/// Current app view/mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// Login/register screen
    Auth,
    /// Grid of the user's boards
    Boards,
    /// One open board, by id
    Board(String),
}

/// Form that closes once its request succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreateBoard,
    CreateList,
    RenameList,
    CreateCard,
    EditCard,
}

/// Result of a spawned request, polled once per frame
#[derive(Debug)]
pub enum AppEvent {
    SignedIn(Result<User, ApiError>),
    Notify(Notification),
    FormSubmitted(FormKind),
    /// Opening a board failed; go back to the grid
    BoardLoadFailed,
    SessionExpired,
}

impl AppEvent {
    /// Events for a finished request: a success notification when one is
    /// given, or the error mapped to a notification. Session expiry always
    /// wins over the per-operation message.
    pub fn from_result<T>(result: &Result<T, ApiError>, success: Option<&str>, fallback: &str) -> Vec<AppEvent> {
        match result {
            Ok(_) => success
                .map(|text| vec![AppEvent::Notify(Notification::success(text))])
                .unwrap_or_default(),
            Err(err) if err.is_session_expired() => vec![AppEvent::SessionExpired],
            Err(err) => vec![AppEvent::Notify(Notification::error(err.user_message(fallback)))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_view::NotificationKind;

    #[test]
    fn test_success_without_text_is_silent() {
        let events = AppEvent::from_result(&Ok::<(), ApiError>(()), None, "Failed to delete card");
        assert!(events.is_empty());
    }

    #[test]
    fn test_error_uses_detail_or_fallback() {
        let err: Result<(), ApiError> = Err(ApiError::status(500, None));
        let events = AppEvent::from_result(&err, Some("Card created"), "Failed to create card");
        match events.as_slice() {
            [AppEvent::Notify(n)] => {
                assert_eq!(n.kind, NotificationKind::Error);
                assert_eq!(n.text, "Failed to create card");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_session_expiry_wins() {
        let err: Result<(), ApiError> = Err(ApiError::SessionExpired);
        let events = AppEvent::from_result(&err, None, "Failed to fetch boards");
        assert!(matches!(events.as_slice(), [AppEvent::SessionExpired]));
    }
}
