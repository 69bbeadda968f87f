use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{
    administrators, interest_profiles, messages, profiles, user_dislikes, user_likes,
    user_matches, users,
};

// --- Lookup rows (genders, professions, statuses, interests) ---

/// All four lookup tables share the (id, description) shape, so one
/// queryable row type covers them.
#[derive(Debug, Queryable, Serialize, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub id: i32,
    pub description: String,
}

// --- Profile ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = profiles)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub identification: String,
    pub slogan: String,
    pub gender_id: i32,
    pub profession_id: i32,
    pub status_id: i32,
    pub total_likes: i32,
    pub created_at: NaiveDateTime,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfile {
    pub name: String,
    pub last_name: String,
    pub identification: String,
    pub slogan: String,
    pub gender_id: i32,
    pub profession_id: i32,
    pub status_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset, Default)]
#[diesel(table_name = profiles)]
pub struct UpdateProfile {
    pub slogan: Option<String>,
    pub profession_id: Option<i32>,
    pub status_id: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = interest_profiles)]
pub struct NewInterestProfile {
    pub profile_id: i32,
    pub interest_id: i32,
}

// --- User ---

#[derive(Debug, Queryable, Identifiable, Clone)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub birthdate: NaiveDate,
    pub bonus_likes: i32,
    pub profile_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub birthdate: NaiveDate,
    pub bonus_likes: i32,
    pub profile_id: i32,
}

// --- Administrator ---

#[derive(Debug, Queryable, Identifiable, Clone)]
#[diesel(table_name = administrators)]
pub struct Administrator {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = administrators)]
pub struct NewAdministrator {
    pub username: String,
    pub password_hash: String,
}

// --- Like / Dislike ---

#[derive(Debug, Queryable, Identifiable, Clone)]
#[diesel(table_name = user_likes)]
pub struct UserLike {
    pub id: i32,
    pub user_id: i32,
    pub liked_profile_id: i32,
    pub like_date: NaiveDateTime,
    pub is_match: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_likes)]
pub struct NewUserLike {
    pub user_id: i32,
    pub liked_profile_id: i32,
    pub like_date: NaiveDateTime,
    pub is_match: bool,
}

#[derive(Debug, Queryable, Identifiable, Clone)]
#[diesel(table_name = user_dislikes)]
pub struct UserDislike {
    pub id: i32,
    pub user_id: i32,
    pub disliked_profile_id: i32,
    pub dislike_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_dislikes)]
pub struct NewUserDislike {
    pub user_id: i32,
    pub disliked_profile_id: i32,
    pub dislike_date: NaiveDateTime,
}

// --- Match ---

#[derive(Debug, Queryable, Identifiable, Clone)]
#[diesel(table_name = user_matches)]
pub struct UserMatch {
    pub id: i32,
    pub user1_id: i32,
    pub user2_id: i32,
    pub match_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_matches)]
pub struct NewUserMatch {
    pub user1_id: i32,
    pub user2_id: i32,
    pub match_date: NaiveDateTime,
}

// --- Message ---

#[derive(Debug, Queryable, Identifiable, Clone)]
#[diesel(table_name = messages)]
pub struct Message {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub body: String,
    pub sent_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub body: String,
    pub sent_at: NaiveDateTime,
}
