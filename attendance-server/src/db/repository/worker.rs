//! Worker Repository
//!
//! Record key = external badge id, so every import path upserts by badge
//! instead of duplicating workers.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Worker, WorkerCreate, WorkerUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "worker";

#[derive(Clone)]
pub struct WorkerRepository {
    base: BaseRepository,
}

impl WorkerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn thing(badge: &str) -> RecordId {
        RecordId::from_table_key(TABLE, badge)
    }

    /// Find all active workers
    pub async fn find_all(&self) -> RepoResult<Vec<Worker>> {
        let workers: Vec<Worker> = self
            .base
            .db()
            .query("SELECT * FROM worker WHERE is_active = true ORDER BY badge")
            .await?
            .take(0)?;
        Ok(workers)
    }

    /// Find all workers including disabled
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Worker>> {
        let workers: Vec<Worker> = self
            .base
            .db()
            .query("SELECT * FROM worker ORDER BY badge")
            .await?
            .take(0)?;
        Ok(workers)
    }

    /// Find worker by badge id
    pub async fn find_by_badge(&self, badge: &str) -> RepoResult<Option<Worker>> {
        let worker: Option<Worker> = self.base.db().select(Self::thing(badge)).await?;
        Ok(worker)
    }

    /// Create a new worker
    pub async fn create(&self, data: WorkerCreate) -> RepoResult<Worker> {
        if self.find_by_badge(&data.badge).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Worker '{}' already exists",
                data.badge
            )));
        }

        let area: RecordId = data
            .area
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid area id: {}", data.area)))?;
        let now = shared::util::now_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE $thing SET
                    badge = $badge,
                    name = $name,
                    area = $area,
                    nationality = $nationality,
                    daily_rate = $daily_rate,
                    base_salary = $base_salary,
                    is_active = true,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", Self::thing(&data.badge)))
            .bind(("badge", data.badge))
            .bind(("name", data.name))
            .bind(("area", area))
            .bind(("nationality", data.nationality))
            .bind(("daily_rate", data.daily_rate))
            .bind(("base_salary", Worker::base_salary_for(data.daily_rate)))
            .bind(("now", now))
            .await?;

        let created: Option<Worker> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create worker".to_string()))
    }

    /// Update a worker (area reassignment, pay-rate change, soft-disable)
    pub async fn update(&self, badge: &str, data: WorkerUpdate) -> RepoResult<Worker> {
        let existing = self
            .find_by_badge(badge)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Worker {} not found", badge)))?;

        let area: Option<RecordId> = match &data.area {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| RepoError::Validation(format!("Invalid area id: {}", raw)))?,
            ),
            None => None,
        };

        // base_salary follows the effective daily rate
        let effective_rate = data.daily_rate.unwrap_or(existing.daily_rate);

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    area = IF $has_area THEN $area ELSE area END,
                    nationality = $nationality OR nationality,
                    daily_rate = IF $has_rate THEN $daily_rate ELSE daily_rate END,
                    base_salary = $base_salary,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", Self::thing(badge)))
            .bind(("name", data.name))
            .bind(("has_area", area.is_some()))
            .bind(("area", area))
            .bind(("nationality", data.nationality))
            .bind(("has_rate", data.daily_rate.is_some()))
            .bind(("daily_rate", data.daily_rate))
            .bind(("base_salary", Worker::base_salary_for(effective_rate)))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .bind(("now", shared::util::now_millis()))
            .await?;

        result
            .take::<Option<Worker>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Worker {} not found", badge)))
    }

    /// Soft-disable a worker
    ///
    /// Attendance history references workers forever, so hard deletes are
    /// never performed.
    pub async fn disable(&self, badge: &str) -> RepoResult<bool> {
        self.update(
            badge,
            WorkerUpdate {
                name: None,
                area: None,
                nationality: None,
                daily_rate: None,
                is_active: Some(false),
            },
        )
        .await?;
        Ok(true)
    }

    /// Import-path upsert: create the worker or refresh name/area/rate
    pub async fn upsert_from_import(
        &self,
        badge: &str,
        name: &str,
        area_id: &str,
        nationality: &str,
        daily_rate: f64,
    ) -> RepoResult<Worker> {
        match self.find_by_badge(badge).await? {
            Some(_) => {
                self.update(
                    badge,
                    WorkerUpdate {
                        name: Some(name.to_string()),
                        area: Some(area_id.to_string()),
                        nationality: None,
                        daily_rate: Some(daily_rate),
                        is_active: None,
                    },
                )
                .await
            }
            None => {
                self.create(WorkerCreate {
                    badge: badge.to_string(),
                    name: name.to_string(),
                    area: area_id.to_string(),
                    nationality: nationality.to_string(),
                    daily_rate,
                })
                .await
            }
        }
    }
}
