use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use validator::Validate;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    Administrator, NewAdministrator, NewInterestProfile, NewProfile, NewUser, Profile, User,
};
use crate::schema::{administrators, interest_profiles, profiles, users};
use crate::services::lookup_service;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            "password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            "password must contain at least one number",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            "password must contain at least one letter",
        ));
    }
    Ok(())
}

/// Everything sign-up asks for: account credentials plus the public profile.
#[derive(Debug, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 20, message = "username must be 3-20 characters"))]
    pub username: String,
    pub password: String,
    pub birthdate: NaiveDate,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    pub identification: String,
    pub slogan: String,
    pub gender_id: i32,
    pub profession_id: i32,
    pub status_id: i32,
    pub interest_ids: Vec<i32>,
}

/// Creates the profile and the owning user in one transaction.
pub fn register(conn: &mut SqliteConnection, req: RegisterRequest) -> AppResult<User> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validate_password(&req.password)?;

    conn.transaction::<User, AppError, _>(|conn| {
        let taken: i64 = users::table
            .filter(users::username.eq(&req.username))
            .count()
            .get_result(conn)?;
        if taken > 0 {
            return Err(AppError::new(
                ErrorCode::UsernameTaken,
                "username already registered",
            ));
        }

        // Resolve the lookup references up front so a typo'd id surfaces as a
        // validation message, not a constraint violation.
        lookup_service::genders::get(conn, req.gender_id)?;
        lookup_service::professions::get(conn, req.profession_id)?;
        lookup_service::statuses::get(conn, req.status_id)?;

        let profile: Profile = diesel::insert_into(profiles::table)
            .values(&NewProfile {
                name: req.name.trim().to_owned(),
                last_name: req.last_name.trim().to_owned(),
                identification: req.identification.trim().to_owned(),
                slogan: req.slogan.trim().to_owned(),
                gender_id: req.gender_id,
                profession_id: req.profession_id,
                status_id: req.status_id,
                created_at: Utc::now().naive_utc(),
            })
            .get_result(conn)?;

        let mut interest_ids = req.interest_ids.clone();
        interest_ids.sort_unstable();
        interest_ids.dedup();
        for interest_id in interest_ids {
            lookup_service::interests::get(conn, interest_id)?;
            diesel::insert_into(interest_profiles::table)
                .values(&NewInterestProfile {
                    profile_id: profile.id,
                    interest_id,
                })
                .execute(conn)?;
        }

        let password_hash = hash_password(&req.password)?;
        let user: User = diesel::insert_into(users::table)
            .values(&NewUser {
                username: req.username.trim().to_owned(),
                password_hash,
                birthdate: req.birthdate,
                bonus_likes: 0,
                profile_id: profile.id,
            })
            .get_result(conn)?;

        tracing::info!(user_id = user.id, profile_id = profile.id, "user registered");
        Ok(user)
    })
}

pub fn get_user(conn: &mut SqliteConnection, user_id: i32) -> AppResult<User> {
    users::table
        .find(user_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, "user not found"))
}

pub fn login(conn: &mut SqliteConnection, username: &str, password: &str) -> AppResult<User> {
    let user: Option<User> = users::table
        .filter(users::username.eq(username))
        .first(conn)
        .optional()?;

    match user {
        Some(user) => {
            if verify_password(password, &user.password_hash)? {
                Ok(user)
            } else {
                Err(AppError::new(
                    ErrorCode::InvalidCredentials,
                    "invalid username or password",
                ))
            }
        }
        None => Err(AppError::new(
            ErrorCode::InvalidCredentials,
            "invalid username or password",
        )),
    }
}

pub fn change_password(
    conn: &mut SqliteConnection,
    user_id: i32,
    old_password: &str,
    new_password: &str,
) -> AppResult<()> {
    let user = get_user(conn, user_id)?;

    if !verify_password(old_password, &user.password_hash)? {
        return Err(AppError::new(
            ErrorCode::InvalidCredentials,
            "current password is incorrect",
        ));
    }
    validate_password(new_password)?;

    let password_hash = hash_password(new_password)?;
    diesel::update(users::table.find(user_id))
        .set(users::password_hash.eq(password_hash))
        .execute(conn)?;

    tracing::info!(user_id, "password changed");
    Ok(())
}

pub fn admin_login(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> AppResult<Administrator> {
    let admin: Option<Administrator> = administrators::table
        .filter(administrators::username.eq(username))
        .first(conn)
        .optional()?;

    match admin {
        Some(admin) => {
            if verify_password(password, &admin.password_hash)? {
                Ok(admin)
            } else {
                Err(AppError::new(
                    ErrorCode::InvalidCredentials,
                    "invalid administrator credentials",
                ))
            }
        }
        None => Err(AppError::new(
            ErrorCode::InvalidCredentials,
            "invalid administrator credentials",
        )),
    }
}

/// Seeds the administrator account on first start so the lookup screens are
/// reachable on a fresh database.
pub fn ensure_default_admin(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> AppResult<()> {
    let existing: i64 = administrators::table.count().get_result(conn)?;
    if existing > 0 {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    diesel::insert_into(administrators::table)
        .values(&NewAdministrator {
            username: username.to_owned(),
            password_hash,
        })
        .execute(conn)?;

    tracing::warn!(username, "created default administrator, change its password");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::errors::ErrorCode;

    fn request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: "sup3rsecret".into(),
            birthdate: NaiveDate::from_ymd_opt(2001, 5, 14).unwrap(),
            name: "Ana".into(),
            last_name: "Rojas".into(),
            identification: "CC-1001".into(),
            slogan: "carpe diem".into(),
            gender_id: 2,
            profession_id: 1,
            status_id: 1,
            interest_ids: vec![1, 3, 3],
        }
    }

    #[test]
    fn register_then_login() {
        let mut conn = connect_in_memory();
        let user = register(&mut conn, request("ana")).unwrap();
        assert_eq!(user.bonus_likes, 0);

        let logged_in = login(&mut conn, "ana", "sup3rsecret").unwrap();
        assert_eq!(logged_in.id, user.id);

        let err = login(&mut conn, "ana", "wrong-pass1").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCredentials.code());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let mut conn = connect_in_memory();
        register(&mut conn, request("ana")).unwrap();
        let err = register(&mut conn, request("ana")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UsernameTaken.code());
    }

    #[test]
    fn weak_passwords_are_rejected() {
        let mut conn = connect_in_memory();
        let mut req = request("ana");
        req.password = "short1".into();
        let err = register(&mut conn, req).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PasswordTooWeak.code());

        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("letters99").is_ok());
    }

    #[test]
    fn unknown_gender_fails_validation_not_storage() {
        let mut conn = connect_in_memory();
        let mut req = request("ana");
        req.gender_id = 99;
        let err = register(&mut conn, req).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownLookupValue.code());
    }

    #[test]
    fn change_password_requires_old_one() {
        let mut conn = connect_in_memory();
        let user = register(&mut conn, request("ana")).unwrap();

        let err = change_password(&mut conn, user.id, "nope1234", "newsecret9").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCredentials.code());

        change_password(&mut conn, user.id, "sup3rsecret", "newsecret9").unwrap();
        login(&mut conn, "ana", "newsecret9").unwrap();
    }

    #[test]
    fn default_admin_is_seeded_once() {
        let mut conn = connect_in_memory();
        ensure_default_admin(&mut conn, "admin", "adminpass1").unwrap();
        ensure_default_admin(&mut conn, "admin", "adminpass1").unwrap();

        admin_login(&mut conn, "admin", "adminpass1").unwrap();
        let err = admin_login(&mut conn, "admin", "badpass99").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCredentials.code());
    }
}
