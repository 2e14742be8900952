//! Persistent log of chatbot exchanges and their feedback.

use chrono::Utc;
use completion_core::ChatMessage;
use restaurant_db::{chatbot_log, ChatbotLog, Database, NewChatbotLog};
use tracing::debug;

/// Response stored for exchanges where the model produced no answer.
pub const FAILED_RESPONSE: &str = "Error occurred";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time in the log timestamp format.
pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Records exchanges and attaches feedback.
#[derive(Debug, Clone)]
pub struct ConversationLogger {
    db: Database,
}

impl ConversationLogger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a successful exchange and return its log id.
    pub async fn record(
        &self,
        restaurant_id: i64,
        session_id: &str,
        user_input: &str,
        response: &str,
        timestamp: &str,
    ) -> restaurant_db::Result<i64> {
        let id = chatbot_log::insert_log(
            self.db.pool(),
            &NewChatbotLog {
                restaurant_id,
                session_id,
                user_input,
                chatbot_response: response,
                error_detail: None,
                timestamp,
            },
        )
        .await?;

        debug!("Logged exchange {} for session {}", id, session_id);
        Ok(id)
    }

    /// Record an exchange that failed upstream.
    pub async fn record_failure(
        &self,
        restaurant_id: i64,
        session_id: &str,
        user_input: &str,
        error_detail: &str,
        timestamp: &str,
    ) -> restaurant_db::Result<i64> {
        chatbot_log::insert_log(
            self.db.pool(),
            &NewChatbotLog {
                restaurant_id,
                session_id,
                user_input,
                chatbot_response: FAILED_RESPONSE,
                error_detail: Some(error_detail),
                timestamp,
            },
        )
        .await
    }

    /// Attach a 1-5 rating and optional comment to a logged exchange.
    pub async fn attach_feedback(
        &self,
        log_id: i64,
        rating: i64,
        feedback_text: Option<&str>,
    ) -> restaurant_db::Result<()> {
        chatbot_log::set_feedback(self.db.pool(), log_id, rating, feedback_text).await
    }

    pub async fn get(&self, log_id: i64) -> restaurant_db::Result<ChatbotLog> {
        chatbot_log::get_log(self.db.pool(), log_id).await
    }

    /// Prior turns of a session as alternating user/assistant messages.
    ///
    /// Only the last `max_turns` successful exchanges for the restaurant are
    /// kept; failed exchanges are skipped.
    pub async fn session_turns(
        &self,
        restaurant_id: i64,
        session_id: &str,
        max_turns: usize,
    ) -> restaurant_db::Result<Vec<ChatMessage>> {
        let logs = chatbot_log::list_session_logs(self.db.pool(), session_id).await?;
        Ok(turns_from_logs(&logs, restaurant_id, max_turns))
    }

    /// A restaurant's most recent exchanges, newest first.
    pub async fn recent(&self, restaurant_id: i64, limit: i64) -> restaurant_db::Result<Vec<ChatbotLog>> {
        chatbot_log::list_recent_logs(self.db.pool(), restaurant_id, limit).await
    }
}

fn turns_from_logs(logs: &[ChatbotLog], restaurant_id: i64, max_turns: usize) -> Vec<ChatMessage> {
    let exchanges: Vec<_> = logs
        .iter()
        .filter(|log| log.restaurant_id == restaurant_id && !log.is_failed())
        .collect();
    let skip = exchanges.len().saturating_sub(max_turns);

    exchanges
        .into_iter()
        .skip(skip)
        .flat_map(|log| {
            [
                ChatMessage::user(log.user_input.as_str()),
                ChatMessage::assistant(log.chatbot_response.as_str()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use completion_core::Role;

    fn log(id: i64, restaurant_id: i64, input: &str, error: Option<&str>) -> ChatbotLog {
        ChatbotLog {
            id,
            restaurant_id,
            session_id: "s-1".to_string(),
            user_input: input.to_string(),
            chatbot_response: format!("reply to {}", input),
            error_detail: error.map(str::to_string),
            timestamp: "2024-01-01 12:00:00".to_string(),
            feedback_rating: None,
            feedback_text: None,
        }
    }

    #[test]
    fn test_turns_alternate_and_skip_failures() {
        let logs = vec![
            log(1, 1, "hi", None),
            log(2, 1, "menu?", Some("timeout")),
            log(3, 1, "hours?", None),
        ];

        let turns = turns_from_logs(&logs, 1, 10);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "hi");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[3].content, "reply to hours?");
    }

    #[test]
    fn test_turns_keep_most_recent() {
        let logs: Vec<_> = (1..=5).map(|i| log(i, 1, &format!("q{}", i), None)).collect();
        let turns = turns_from_logs(&logs, 1, 2);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].content, "q4");
    }

    #[test]
    fn test_turns_scoped_to_restaurant() {
        let logs = vec![log(1, 2, "elsewhere", None), log(2, 1, "here", None)];
        let turns = turns_from_logs(&logs, 1, 10);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "here");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[10..11], " ");
    }
}
