//! Area Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Area, AreaCreate, AreaUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct AreaRepository {
    base: BaseRepository,
}

impl AreaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active areas
    pub async fn find_all(&self) -> RepoResult<Vec<Area>> {
        let areas: Vec<Area> = self
            .base
            .db()
            .query("SELECT * FROM area WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(areas)
    }

    /// Find area by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Area>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let area: Option<Area> = self.base.db().select(thing).await?;
        Ok(area)
    }

    /// Find active area by display name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Area>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM area WHERE name = $name AND is_active = true LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let areas: Vec<Area> = result.take(0)?;
        Ok(areas.into_iter().next())
    }

    /// Create a new area
    pub async fn create(&self, data: AreaCreate) -> RepoResult<Area> {
        // Name unique among active areas
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Area '{}' already exists",
                data.name
            )));
        }

        // "a" prefix keeps the key alphanumeric so the rendered id
        // ("area:a…") stays plain ASCII in scope strings
        let id = RecordId::from_table_key("area", format!("a{}", shared::util::snowflake_id()));
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE $thing SET
                    name = $name,
                    is_active = true,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id))
            .bind(("name", data.name))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let created: Option<Area> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create area".to_string()))
    }

    /// Find an active area by name or id, creating it by name when unseen.
    ///
    /// Import rows carry either an area id or a raw display name; unseen
    /// names create the area on demand.
    pub async fn find_or_create(&self, name_or_id: &str) -> RepoResult<Area> {
        if name_or_id.starts_with("area:")
            && let Some(area) = self.find_by_id(name_or_id).await?
        {
            return Ok(area);
        }
        if let Some(area) = self.find_by_name(name_or_id).await? {
            return Ok(area);
        }
        self.create(AreaCreate {
            name: name_or_id.to_string(),
        })
        .await
    }

    /// Update an area
    pub async fn update(&self, id: &str, data: AreaUpdate) -> RepoResult<Area> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Area {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Area '{}' already exists",
                new_name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .await?;

        result
            .take::<Option<Area>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Area {} not found", id)))
    }
}
