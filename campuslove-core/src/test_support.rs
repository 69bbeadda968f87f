use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::models::{NewInterestProfile, NewProfile, NewUser, Profile, User};
use crate::schema::{interest_profiles, profiles, users};

/// Inserts a user plus owned profile directly, skipping registration so tests
/// stay fast (no argon2 work). Login-path tests go through
/// `auth_service::register` instead.
pub fn seed_user(conn: &mut SqliteConnection, username: &str) -> User {
    seed(conn, username, 1, &[1, 2])
}

pub fn seed_user_with_gender(conn: &mut SqliteConnection, username: &str, gender_id: i32) -> User {
    seed(conn, username, gender_id, &[1, 2])
}

pub fn seed_user_with_interests(
    conn: &mut SqliteConnection,
    username: &str,
    interest_ids: &[i32],
) -> User {
    seed(conn, username, 1, interest_ids)
}

fn seed(
    conn: &mut SqliteConnection,
    username: &str,
    gender_id: i32,
    interest_ids: &[i32],
) -> User {
    let profile: Profile = diesel::insert_into(profiles::table)
        .values(&NewProfile {
            name: username.to_owned(),
            last_name: "Test".into(),
            identification: format!("ID-{username}"),
            slogan: "hello there".into(),
            gender_id,
            profession_id: 1,
            status_id: 1,
            created_at: Utc::now().naive_utc(),
        })
        .get_result(conn)
        .expect("seed profile");

    for &interest_id in interest_ids {
        diesel::insert_into(interest_profiles::table)
            .values(&NewInterestProfile {
                profile_id: profile.id,
                interest_id,
            })
            .execute(conn)
            .expect("seed interest");
    }

    diesel::insert_into(users::table)
        .values(&NewUser {
            username: username.to_owned(),
            password_hash: "seeded-not-a-real-hash".into(),
            birthdate: NaiveDate::from_ymd_opt(2000, 1, 1).expect("date"),
            bonus_likes: 0,
            profile_id: profile.id,
        })
        .get_result(conn)
        .expect("seed user")
}
