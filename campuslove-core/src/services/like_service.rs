use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{NewUserDislike, NewUserLike, Profile, User};
use crate::schema::{profiles, user_dislikes, user_likes, users};
use crate::services::match_service;

/// Base allowance before the bonus pool is touched. The cap is cumulative:
/// the original product never reset it by day, and that behavior is kept.
pub const BASE_DAILY_LIKES: i64 = 10;

/// Records a directed like and reconciles it against the reverse direction,
/// all in one transaction. Returns whether the like completed a mutual match.
///
/// Duplicate likes and an exhausted quota roll back without touching storage
/// and surface as `AlreadyLiked` / `QuotaExceeded`.
pub fn record_like(
    conn: &mut SqliteConnection,
    acting_user_id: i32,
    target_profile_id: i32,
) -> AppResult<bool> {
    conn.transaction::<bool, AppError, _>(|conn| {
        let acting: User = users::table
            .find(acting_user_id)
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, "user not found"))?;

        if acting.profile_id == target_profile_id {
            return Err(AppError::new(
                ErrorCode::CannotLikeSelf,
                "you cannot like your own profile",
            ));
        }

        let target: Profile = profiles::table
            .find(target_profile_id)
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;

        let duplicate: i64 = user_likes::table
            .filter(user_likes::user_id.eq(acting.id))
            .filter(user_likes::liked_profile_id.eq(target.id))
            .count()
            .get_result(conn)?;
        if duplicate > 0 {
            return Err(AppError::new(
                ErrorCode::AlreadyLiked,
                "you already liked this profile",
            ));
        }

        // Base likes stay in the like count; bonus likes are spent from the
        // pool, so a like past the base is funded iff the pool is non-empty.
        let used = like_count(conn, acting.id)?;
        if used >= BASE_DAILY_LIKES && acting.bonus_likes == 0 {
            return Err(AppError::new(
                ErrorCode::QuotaExceeded,
                "no likes remaining, purchase bonus likes to continue",
            ));
        }

        diesel::insert_into(user_likes::table)
            .values(&NewUserLike {
                user_id: acting.id,
                liked_profile_id: target.id,
                like_date: Utc::now().naive_utc(),
                is_match: false,
            })
            .execute(conn)?;

        // This slot came out of the purchased pool.
        if used >= BASE_DAILY_LIKES {
            diesel::update(users::table.find(acting.id))
                .set(users::bonus_likes.eq(users::bonus_likes - 1))
                .execute(conn)?;
        }

        diesel::update(profiles::table.find(target.id))
            .set(profiles::total_likes.eq(profiles::total_likes + 1))
            .execute(conn)?;

        let matched = match_service::reconcile(conn, acting.id, target.id)?;
        tracing::info!(
            user_id = acting.id,
            profile_id = target.id,
            matched,
            "like recorded"
        );
        Ok(matched)
    })
}

/// Dislikes carry no quota and no match semantics; only the duplicate check
/// applies.
pub fn record_dislike(
    conn: &mut SqliteConnection,
    acting_user_id: i32,
    target_profile_id: i32,
) -> AppResult<()> {
    conn.transaction::<(), AppError, _>(|conn| {
        let acting: User = users::table
            .find(acting_user_id)
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, "user not found"))?;

        if acting.profile_id == target_profile_id {
            return Err(AppError::new(
                ErrorCode::CannotLikeSelf,
                "you cannot dislike your own profile",
            ));
        }

        let target: Profile = profiles::table
            .find(target_profile_id)
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;

        let duplicate: i64 = user_dislikes::table
            .filter(user_dislikes::user_id.eq(acting.id))
            .filter(user_dislikes::disliked_profile_id.eq(target.id))
            .count()
            .get_result(conn)?;
        if duplicate > 0 {
            return Err(AppError::new(
                ErrorCode::AlreadyDisliked,
                "you already disliked this profile",
            ));
        }

        diesel::insert_into(user_dislikes::table)
            .values(&NewUserDislike {
                user_id: acting.id,
                disliked_profile_id: target.id,
                dislike_date: Utc::now().naive_utc(),
            })
            .execute(conn)?;

        tracing::info!(user_id = acting.id, profile_id = target.id, "dislike recorded");
        Ok(())
    })
}

pub fn like_count(conn: &mut SqliteConnection, user_id: i32) -> AppResult<i64> {
    Ok(user_likes::table
        .filter(user_likes::user_id.eq(user_id))
        .count()
        .get_result(conn)?)
}

/// Likes the user can still spend: whatever is left of the base allowance
/// plus the unspent bonus pool. The pool is already debited per like, so it
/// is added as-is.
pub fn remaining_likes(conn: &mut SqliteConnection, user_id: i32) -> AppResult<i64> {
    let user: User = users::table
        .find(user_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, "user not found"))?;

    let used = like_count(conn, user_id)?;
    Ok((BASE_DAILY_LIKES - used).max(0) + i64::from(user.bonus_likes))
}

/// Credits purchased likes after the (simulated) payment confirmation.
/// Returns the new bonus balance.
pub fn purchase_bonus_likes(
    conn: &mut SqliteConnection,
    user_id: i32,
    amount: i32,
) -> AppResult<i32> {
    if amount <= 0 {
        return Err(AppError::Validation("purchase amount must be positive".into()));
    }

    let updated = diesel::update(users::table.find(user_id))
        .set(users::bonus_likes.eq(users::bonus_likes + amount))
        .execute(conn)?;
    if updated == 0 {
        return Err(AppError::new(ErrorCode::UserNotFound, "user not found"));
    }

    let user: User = users::table.find(user_id).first(conn)?;
    tracing::info!(user_id, amount, balance = user.bonus_likes, "bonus likes credited");
    Ok(user.bonus_likes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::models::UserLike;
    use crate::schema::{user_likes, user_matches};
    use crate::test_support::seed_user;

    #[test]
    fn like_is_idempotent() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        assert!(!record_like(&mut conn, ana.id, luis.profile_id).unwrap());
        let err = record_like(&mut conn, ana.id, luis.profile_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyLiked.code());

        let rows: Vec<UserLike> = user_likes::table.load(&mut conn).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn self_like_is_rejected() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let err = record_like(&mut conn, ana.id, ana.profile_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CannotLikeSelf.code());
    }

    #[test]
    fn eleventh_like_exceeds_base_quota() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let targets: Vec<_> = (0..11)
            .map(|i| seed_user(&mut conn, &format!("target{i}")))
            .collect();

        for target in &targets[..10] {
            record_like(&mut conn, ana.id, target.profile_id).unwrap();
        }
        assert_eq!(remaining_likes(&mut conn, ana.id).unwrap(), 0);

        let err = record_like(&mut conn, ana.id, targets[10].profile_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::QuotaExceeded.code());
        assert_eq!(like_count(&mut conn, ana.id).unwrap(), 10);
    }

    #[test]
    fn purchased_likes_extend_the_allowance_and_drain_first_past_base() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let targets: Vec<_> = (0..11)
            .map(|i| seed_user(&mut conn, &format!("target{i}")))
            .collect();

        for target in &targets[..10] {
            record_like(&mut conn, ana.id, target.profile_id).unwrap();
        }

        let balance = purchase_bonus_likes(&mut conn, ana.id, 5).unwrap();
        assert_eq!(balance, 5);
        assert_eq!(remaining_likes(&mut conn, ana.id).unwrap(), 5);

        record_like(&mut conn, ana.id, targets[10].profile_id).unwrap();

        let reloaded: crate::models::User = crate::schema::users::table
            .find(ana.id)
            .first(&mut conn)
            .unwrap();
        assert_eq!(reloaded.bonus_likes, 4);
        assert_eq!(remaining_likes(&mut conn, ana.id).unwrap(), 4);
    }

    #[test]
    fn every_purchased_like_is_spendable() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let targets: Vec<_> = (0..16)
            .map(|i| seed_user(&mut conn, &format!("target{i}")))
            .collect();

        for target in &targets[..10] {
            record_like(&mut conn, ana.id, target.profile_id).unwrap();
        }
        purchase_bonus_likes(&mut conn, ana.id, 5).unwrap();
        for target in &targets[10..15] {
            record_like(&mut conn, ana.id, target.profile_id).unwrap();
        }

        assert_eq!(like_count(&mut conn, ana.id).unwrap(), 15);
        assert_eq!(remaining_likes(&mut conn, ana.id).unwrap(), 0);

        let err = record_like(&mut conn, ana.id, targets[15].profile_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::QuotaExceeded.code());
    }

    #[test]
    fn dislike_touches_neither_quota_nor_matches() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");

        record_dislike(&mut conn, ana.id, luis.profile_id).unwrap();
        let err = record_dislike(&mut conn, ana.id, luis.profile_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyDisliked.code());

        assert_eq!(remaining_likes(&mut conn, ana.id).unwrap(), BASE_DAILY_LIKES);
        let matches: i64 = user_matches::table.count().get_result(&mut conn).unwrap();
        assert_eq!(matches, 0);
    }

    #[test]
    fn quota_invariant_holds_after_any_sequence() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let targets: Vec<_> = (0..14)
            .map(|i| seed_user(&mut conn, &format!("target{i}")))
            .collect();
        purchase_bonus_likes(&mut conn, ana.id, 2).unwrap();

        for target in &targets {
            let _ = record_like(&mut conn, ana.id, target.profile_id);
            let _ = record_like(&mut conn, ana.id, target.profile_id);
        }

        let reloaded: crate::models::User = crate::schema::users::table
            .find(ana.id)
            .first(&mut conn)
            .unwrap();
        let count = like_count(&mut conn, ana.id).unwrap();
        assert!(count <= BASE_DAILY_LIKES + 2);
        assert_eq!(count, 12);
        assert_eq!(reloaded.bonus_likes, 0);
    }

    #[test]
    fn liked_profile_accumulates_total_likes() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        let luis = seed_user(&mut conn, "luis");
        let marta = seed_user(&mut conn, "marta");

        record_like(&mut conn, ana.id, luis.profile_id).unwrap();
        record_like(&mut conn, marta.id, luis.profile_id).unwrap();

        let profile = crate::services::profile_service::get_profile(&mut conn, luis.profile_id)
            .unwrap();
        assert_eq!(profile.total_likes, 2);
    }
}
