//! CRUD for the four lookup tables (genders, professions, statuses,
//! interests). They share one shape, so one macro-generated module per table
//! replaces four copies of the same queries.

macro_rules! lookup_service {
    ($name:ident, $label:literal) => {
        pub mod $name {
            use diesel::prelude::*;
            use diesel::sqlite::SqliteConnection;

            use crate::errors::{AppError, AppResult, ErrorCode};
            use crate::models::Lookup;
            use crate::schema::$name as t;

            pub fn list(conn: &mut SqliteConnection) -> AppResult<Vec<Lookup>> {
                Ok(t::table.order(t::id.asc()).load(conn)?)
            }

            pub fn get(conn: &mut SqliteConnection, id: i32) -> AppResult<Lookup> {
                t::table.find(id).first(conn).optional()?.ok_or_else(|| {
                    AppError::new(
                        ErrorCode::UnknownLookupValue,
                        concat!($label, " does not exist"),
                    )
                })
            }

            pub fn create(conn: &mut SqliteConnection, description: &str) -> AppResult<Lookup> {
                let description = description.trim();
                if description.is_empty() {
                    return Err(AppError::Validation(
                        concat!($label, " description cannot be empty").into(),
                    ));
                }
                Ok(diesel::insert_into(t::table)
                    .values(t::description.eq(description))
                    .get_result(conn)?)
            }

            pub fn rename(
                conn: &mut SqliteConnection,
                id: i32,
                description: &str,
            ) -> AppResult<Lookup> {
                let description = description.trim();
                if description.is_empty() {
                    return Err(AppError::Validation(
                        concat!($label, " description cannot be empty").into(),
                    ));
                }
                let updated = diesel::update(t::table.find(id))
                    .set(t::description.eq(description))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(AppError::new(
                        ErrorCode::UnknownLookupValue,
                        concat!($label, " does not exist"),
                    ));
                }
                get(conn, id)
            }

            pub fn delete(conn: &mut SqliteConnection, id: i32) -> AppResult<()> {
                use diesel::result::{DatabaseErrorKind, Error};
                match diesel::delete(t::table.find(id)).execute(conn) {
                    Ok(0) => Err(AppError::new(
                        ErrorCode::UnknownLookupValue,
                        concat!($label, " does not exist"),
                    )),
                    Ok(_) => Ok(()),
                    Err(Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                        Err(AppError::Validation(
                            concat!($label, " is still used by a profile").into(),
                        ))
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    };
}

lookup_service!(genders, "gender");
lookup_service!(professions, "profession");
lookup_service!(statuses, "status");
lookup_service!(interests, "interest");
