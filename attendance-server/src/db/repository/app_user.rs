//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AppUser, UserCreate, UserUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "app_user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users
    pub async fn find_all(&self) -> RepoResult<Vec<AppUser>> {
        let users: Vec<AppUser> = self
            .base
            .db()
            .query("SELECT * FROM app_user ORDER BY name")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<AppUser>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<AppUser> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Create a new user
    pub async fn create(&self, data: UserCreate) -> RepoResult<AppUser> {
        // "u" prefix keeps the key alphanumeric so the rendered id
        // ("app_user:u…") stays plain ASCII in headers and scope strings
        let id = RecordId::from_table_key(TABLE, format!("u{}", shared::util::snowflake_id()));
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE $thing SET
                    name = $name,
                    role = $role,
                    scope = $scope,
                    nationality_restriction = $nationality_restriction,
                    is_active = true,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id))
            .bind(("name", data.name))
            .bind(("role", data.role))
            .bind(("scope", data.scope.encode()))
            .bind(("nationality_restriction", data.nationality_restriction))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let created: Option<AppUser> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<AppUser> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    role = IF $has_role THEN $role ELSE role END,
                    scope = $scope OR scope,
                    nationality_restriction = IF $has_restriction
                        THEN $nationality_restriction
                        ELSE nationality_restriction END,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("has_role", data.role.is_some()))
            .bind(("role", data.role))
            .bind(("scope", data.scope.map(|s| s.encode())))
            .bind(("has_restriction", data.nationality_restriction.is_some()))
            .bind((
                "nationality_restriction",
                data.nationality_restriction.flatten(),
            ))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .await?;

        result
            .take::<Option<AppUser>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Deactivate a user
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.update(
            id,
            UserUpdate {
                name: None,
                role: None,
                scope: None,
                nationality_restriction: None,
                is_active: Some(false),
            },
        )
        .await?;
        Ok(true)
    }
}
