use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Profile, UpdateProfile, User};
use crate::schema::{genders, interest_profiles, interests, professions, profiles, statuses};

/// A profile with its lookup references resolved, ready for the browser to
/// render.
#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub profile: Profile,
    pub gender: String,
    pub profession: String,
    pub status: String,
    pub interests: Vec<String>,
}

pub fn get_profile(conn: &mut SqliteConnection, profile_id: i32) -> AppResult<Profile> {
    profiles::table
        .find(profile_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))
}

pub fn interests_for(conn: &mut SqliteConnection, profile_id: i32) -> AppResult<Vec<String>> {
    Ok(interest_profiles::table
        .inner_join(interests::table)
        .filter(interest_profiles::profile_id.eq(profile_id))
        .select(interests::description)
        .order(interests::description.asc())
        .load(conn)?)
}

pub fn card_for(conn: &mut SqliteConnection, profile_id: i32) -> AppResult<ProfileCard> {
    let (profile, gender, profession, status): (Profile, String, String, String) =
        profiles::table
            .inner_join(genders::table)
            .inner_join(professions::table)
            .inner_join(statuses::table)
            .filter(profiles::id.eq(profile_id))
            .select((
                profiles::all_columns,
                genders::description,
                professions::description,
                statuses::description,
            ))
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;

    let interests = interests_for(conn, profile.id)?;
    Ok(ProfileCard {
        profile,
        gender,
        profession,
        status,
        interests,
    })
}

/// Candidate profiles for the browser: everyone except the actor's own
/// profile, optionally narrowed to a preferred gender.
pub fn browse_candidates(
    conn: &mut SqliteConnection,
    current_user: &User,
    preferred_gender_id: Option<i32>,
) -> AppResult<Vec<ProfileCard>> {
    let mut query = profiles::table
        .inner_join(genders::table)
        .inner_join(professions::table)
        .inner_join(statuses::table)
        .filter(profiles::id.ne(current_user.profile_id))
        .select((
            profiles::all_columns,
            genders::description,
            professions::description,
            statuses::description,
        ))
        .order(profiles::created_at.desc())
        .into_boxed();

    if let Some(gender_id) = preferred_gender_id {
        query = query.filter(profiles::gender_id.eq(gender_id));
    }

    let rows: Vec<(Profile, String, String, String)> = query.load(conn)?;

    rows.into_iter()
        .map(|(profile, gender, profession, status)| {
            let interests = interests_for(conn, profile.id)?;
            Ok(ProfileCard {
                profile,
                gender,
                profession,
                status,
                interests,
            })
        })
        .collect()
}

pub fn update_profile(
    conn: &mut SqliteConnection,
    profile_id: i32,
    changes: UpdateProfile,
) -> AppResult<Profile> {
    if changes.slogan.is_none() && changes.profession_id.is_none() && changes.status_id.is_none() {
        return get_profile(conn, profile_id);
    }

    let updated = diesel::update(profiles::table.find(profile_id))
        .set(&changes)
        .execute(conn)?;
    if updated == 0 {
        return Err(AppError::new(ErrorCode::ProfileNotFound, "profile not found"));
    }

    tracing::info!(profile_id, "profile updated");
    get_profile(conn, profile_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::test_support::{seed_user, seed_user_with_gender};

    #[test]
    fn browser_excludes_own_profile() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");
        seed_user(&mut conn, "luis");
        seed_user(&mut conn, "marta");

        let cards = browse_candidates(&mut conn, &ana, None).unwrap();
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.profile.id != ana.profile_id));
    }

    #[test]
    fn browser_honors_gender_preference() {
        let mut conn = connect_in_memory();
        let ana = seed_user_with_gender(&mut conn, "ana", 2);
        seed_user_with_gender(&mut conn, "luis", 1);
        seed_user_with_gender(&mut conn, "marta", 2);

        let cards = browse_candidates(&mut conn, &ana, Some(1)).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].gender, "Male");
    }

    #[test]
    fn card_resolves_lookups_and_interests() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");

        let card = card_for(&mut conn, ana.profile_id).unwrap();
        assert_eq!(card.profession, "Student");
        assert_eq!(card.status, "Single");
        assert_eq!(card.interests, vec!["Music".to_string(), "Sports".to_string()]);
    }

    #[test]
    fn partial_update_only_touches_given_fields() {
        let mut conn = connect_in_memory();
        let ana = seed_user(&mut conn, "ana");

        let before = get_profile(&mut conn, ana.profile_id).unwrap();
        let after = update_profile(
            &mut conn,
            ana.profile_id,
            UpdateProfile {
                slogan: Some("new slogan".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(after.slogan, "new slogan");
        assert_eq!(after.profession_id, before.profession_id);
        assert_eq!(after.status_id, before.status_id);
    }
}
