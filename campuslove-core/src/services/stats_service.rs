//! Reporting queries for the statistics screen. These are aggregations over
//! several tables, expressed as raw SQL the same way the original reporting
//! layer wrote them.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::sqlite::SqliteConnection;

use crate::errors::AppResult;

/// A user ranked by how many likes they have recorded.
#[derive(Debug, QueryableByName, PartialEq, Eq)]
pub struct LikeLeader {
    #[diesel(sql_type = Text)]
    pub username: String,
    #[diesel(sql_type = BigInt)]
    pub total_likes: i64,
}

#[derive(Debug, QueryableByName, PartialEq, Eq)]
pub struct PopularInterest {
    #[diesel(sql_type = Text)]
    pub description: String,
    #[diesel(sql_type = BigInt)]
    pub users_count: i64,
}

#[derive(Debug, QueryableByName, PartialEq, Eq)]
pub struct GenderMatchStats {
    #[diesel(sql_type = Text)]
    pub gender: String,
    #[diesel(sql_type = BigInt)]
    pub match_count: i64,
}

const LIKE_LEADER_SQL: &str = "\
    SELECT u.username AS username, COUNT(ul.id) AS total_likes \
    FROM users u \
    LEFT JOIN user_likes ul ON u.id = ul.user_id \
    GROUP BY u.id \
    ORDER BY total_likes ";

pub fn user_with_most_likes(conn: &mut SqliteConnection) -> AppResult<Option<LikeLeader>> {
    let rows: Vec<LikeLeader> =
        diesel::sql_query(format!("{LIKE_LEADER_SQL}DESC, u.id ASC LIMIT 1")).load(conn)?;
    Ok(rows.into_iter().next())
}

pub fn user_with_fewest_likes(conn: &mut SqliteConnection) -> AppResult<Option<LikeLeader>> {
    let rows: Vec<LikeLeader> =
        diesel::sql_query(format!("{LIKE_LEADER_SQL}ASC, u.id ASC LIMIT 1")).load(conn)?;
    Ok(rows.into_iter().next())
}

pub fn most_popular_interests(
    conn: &mut SqliteConnection,
    take: i32,
) -> AppResult<Vec<PopularInterest>> {
    Ok(diesel::sql_query(
        "SELECT i.description AS description, COUNT(ip.profile_id) AS users_count \
         FROM interests i \
         JOIN interest_profiles ip ON i.id = ip.interest_id \
         GROUP BY i.id \
         ORDER BY users_count DESC, i.description ASC \
         LIMIT ?",
    )
    .bind::<Integer, _>(take)
    .load(conn)?)
}

/// Matches grouped by the gender of the match's first user, mirroring the
/// original report.
pub fn matches_by_gender(conn: &mut SqliteConnection) -> AppResult<Vec<GenderMatchStats>> {
    Ok(diesel::sql_query(
        "SELECT g.description AS gender, COUNT(um.id) AS match_count \
         FROM user_matches um \
         JOIN users u ON um.user1_id = u.id \
         JOIN profiles p ON u.profile_id = p.id \
         JOIN genders g ON p.gender_id = g.id \
         GROUP BY g.description \
         ORDER BY match_count DESC",
    )
    .load(conn)?)
}
