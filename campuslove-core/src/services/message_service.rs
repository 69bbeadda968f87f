use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Message, NewMessage};
use crate::schema::messages;
use crate::services::match_service;

/// Messaging is only open between matched users.
pub fn send_message(
    conn: &mut SqliteConnection,
    sender_id: i32,
    receiver_id: i32,
    body: &str,
) -> AppResult<Message> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AppError::Validation("message cannot be empty".into()));
    }

    if !match_service::are_matched(conn, sender_id, receiver_id)? {
        return Err(AppError::new(
            ErrorCode::NotMatched,
            "you can only message your matches",
        ));
    }

    let message: Message = diesel::insert_into(messages::table)
        .values(&NewMessage {
            sender_id,
            receiver_id,
            body: body.to_owned(),
            sent_at: Utc::now().naive_utc(),
        })
        .get_result(conn)?;

    tracing::info!(sender_id, receiver_id, "message sent");
    Ok(message)
}

/// Both directions of the conversation, oldest first.
pub fn conversation(
    conn: &mut SqliteConnection,
    user_a: i32,
    user_b: i32,
) -> AppResult<Vec<Message>> {
    Ok(messages::table
        .filter(
            messages::sender_id
                .eq(user_a)
                .and(messages::receiver_id.eq(user_b))
                .or(messages::sender_id
                    .eq(user_b)
                    .and(messages::receiver_id.eq(user_a))),
        )
        .order(messages::sent_at.asc())
        .then_order_by(messages::id.asc())
        .load(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::services::like_service::record_like;
    use crate::test_support::seed_user;

    #[test]
    fn messaging_requires_a_match() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        let err = send_message(&mut conn, ana.id, luis.id, "hey").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotMatched.code());

        record_like(&mut conn, ana.id, luis.profile_id).unwrap();
        record_like(&mut conn, luis.id, ana.profile_id).unwrap();

        send_message(&mut conn, ana.id, luis.id, "hey").unwrap();
        send_message(&mut conn, luis.id, ana.id, "hi back").unwrap();

        let thread = conversation(&mut conn, ana.id, luis.id).unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].body, "hey");
        assert_eq!(thread[1].body, "hi back");
    }

    #[test]
    fn empty_messages_are_rejected() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        let err = send_message(&mut conn, ana.id, luis.id, "   ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError.code());
    }
}
