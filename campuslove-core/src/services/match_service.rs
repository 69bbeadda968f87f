use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{NewUserMatch, Profile, User, UserLike, UserMatch};
use crate::schema::{profiles, user_likes, user_matches, users};

/// Checks whether a freshly recorded like completes a mutual pair; if it
/// does, creates the match and flips `is_match` on both like rows.
///
/// The original swallowed every lookup failure into `false`. Here a missing
/// owner or actor is a data-integrity problem: it is logged and surfaced,
/// never confused with a legitimate non-match.
pub fn reconcile(
    conn: &mut SqliteConnection,
    acting_user_id: i32,
    target_profile_id: i32,
) -> AppResult<bool> {
    let other: User = users::table
        .filter(users::profile_id.eq(target_profile_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            tracing::warn!(
                profile_id = target_profile_id,
                "reconciliation: liked profile has no owning user"
            );
            AppError::new(ErrorCode::UserNotFound, "liked profile has no owning user")
        })?;

    let acting: User = users::table
        .find(acting_user_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            tracing::warn!(user_id = acting_user_id, "reconciliation: acting user missing");
            AppError::new(ErrorCode::UserNotFound, "user not found")
        })?;

    let reverse: Option<UserLike> = user_likes::table
        .filter(user_likes::user_id.eq(other.id))
        .filter(user_likes::liked_profile_id.eq(acting.profile_id))
        .first(conn)
        .optional()?;

    let Some(reverse) = reverse else {
        return Ok(false);
    };

    diesel::insert_into(user_matches::table)
        .values(&NewUserMatch {
            user1_id: acting.id,
            user2_id: other.id,
            match_date: Utc::now().naive_utc(),
        })
        .execute(conn)?;

    diesel::update(
        user_likes::table
            .filter(user_likes::user_id.eq(acting.id))
            .filter(user_likes::liked_profile_id.eq(target_profile_id)),
    )
    .set(user_likes::is_match.eq(true))
    .execute(conn)?;

    diesel::update(user_likes::table.find(reverse.id))
        .set(user_likes::is_match.eq(true))
        .execute(conn)?;

    tracing::info!(
        user1_id = acting.id,
        user2_id = other.id,
        "mutual like, match created"
    );
    Ok(true)
}

pub fn are_matched(conn: &mut SqliteConnection, user_a: i32, user_b: i32) -> AppResult<bool> {
    let count: i64 = user_matches::table
        .filter(
            user_matches::user1_id
                .eq(user_a)
                .and(user_matches::user2_id.eq(user_b))
                .or(user_matches::user1_id
                    .eq(user_b)
                    .and(user_matches::user2_id.eq(user_a))),
        )
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// One row of the "your matches" screen.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub match_id: i32,
    pub other_user_id: i32,
    pub other_username: String,
    pub other_full_name: String,
    pub match_date: NaiveDateTime,
}

pub fn matches_for(conn: &mut SqliteConnection, user_id: i32) -> AppResult<Vec<MatchSummary>> {
    let rows: Vec<UserMatch> = user_matches::table
        .filter(
            user_matches::user1_id
                .eq(user_id)
                .or(user_matches::user2_id.eq(user_id)),
        )
        .order(user_matches::match_date.desc())
        .load(conn)?;

    rows.into_iter()
        .map(|m| {
            let other_id = if m.user1_id == user_id { m.user2_id } else { m.user1_id };
            let other: User = users::table
                .find(other_id)
                .first(conn)
                .optional()?
                .ok_or_else(|| {
                    tracing::warn!(match_id = m.id, user_id = other_id, "match references missing user");
                    AppError::new(ErrorCode::UserNotFound, "match counterpart not found")
                })?;
            let profile: Profile = profiles::table.find(other.profile_id).first(conn)?;
            Ok(MatchSummary {
                match_id: m.id,
                other_user_id: other.id,
                other_username: other.username,
                other_full_name: profile.full_name(),
                match_date: m.match_date,
            })
        })
        .collect()
}

pub fn recent_matches_for(
    conn: &mut SqliteConnection,
    user_id: i32,
    limit: usize,
) -> AppResult<Vec<MatchSummary>> {
    let mut all = matches_for(conn, user_id)?;
    all.truncate(limit);
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::services::like_service::record_like;
    use crate::test_support::seed_user;

    #[test]
    fn one_directional_like_is_not_a_match() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        let matched = record_like(&mut conn, ana.id, luis.profile_id).unwrap();
        assert!(!matched);

        let total: i64 = user_matches::table.count().get_result(&mut conn).unwrap();
        assert_eq!(total, 0);
        assert!(!are_matched(&mut conn, ana.id, luis.id).unwrap());
    }

    #[test]
    fn mutual_likes_create_exactly_one_match_with_both_flags_set() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        assert!(!record_like(&mut conn, ana.id, luis.profile_id).unwrap());
        assert!(record_like(&mut conn, luis.id, ana.profile_id).unwrap());

        let total: i64 = user_matches::table.count().get_result(&mut conn).unwrap();
        assert_eq!(total, 1);
        assert!(are_matched(&mut conn, ana.id, luis.id).unwrap());
        assert!(are_matched(&mut conn, luis.id, ana.id).unwrap());

        let likes: Vec<UserLike> = user_likes::table.load(&mut conn).unwrap();
        assert_eq!(likes.len(), 2);
        assert!(likes.iter().all(|l| l.is_match));
    }

    #[test]
    fn orphan_profile_is_an_error_not_a_silent_false() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        // Break the back-reference on purpose.
        diesel::delete(users::table.find(luis.id))
            .execute(&mut conn)
            .unwrap();

        let err = reconcile(&mut conn, ana.id, luis.profile_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound.code());
    }

    #[test]
    fn match_summaries_name_the_counterpart() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");
        let marta = seed_user(&mut conn, "marta");

        record_like(&mut conn, ana.id, luis.profile_id).unwrap();
        record_like(&mut conn, luis.id, ana.profile_id).unwrap();
        record_like(&mut conn, marta.id, ana.profile_id).unwrap();
        record_like(&mut conn, ana.id, marta.profile_id).unwrap();

        let summaries = matches_for(&mut conn, ana.id).unwrap();
        assert_eq!(summaries.len(), 2);
        let names: Vec<_> = summaries.iter().map(|s| s.other_username.as_str()).collect();
        assert!(names.contains(&"luis"));
        assert!(names.contains(&"marta"));

        let recent = recent_matches_for(&mut conn, ana.id, 1).unwrap();
        assert_eq!(recent.len(), 1);
    }
}
