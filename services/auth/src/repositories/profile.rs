//! Profile repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use common::models::{NewProfile, Profile, UpdateProfile};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

/// Single-row access to the `profiles` table
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Look a profile up by its primary key; `None` when there is no row
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Insert the profile of user `id`; `is_admin` is always false
    async fn create(&self, id: Uuid, new_profile: &NewProfile) -> Result<Profile>;

    /// Apply the provided fields to the row of user `id`
    async fn update(&self, id: Uuid, changes: &UpdateProfile) -> Result<Profile>;
}

/// Profile repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn profile_from_row(row: &PgRow) -> Result<Profile> {
    Ok(Profile {
        id: row.try_get("id")?,
        display_name: row.try_get("display_name")?,
        municipio: row.try_get::<String, _>("municipio")?.parse()?,
        contact_preference: row.try_get::<String, _>("contact_preference")?.parse()?,
        contact_info: row.try_get("contact_info")?,
        avatar_url: row.try_get("avatar_url")?,
        is_admin: row.try_get("is_admin")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        info!("Finding profile by ID: {}", id);

        let row = sqlx::query(
            r#"
            SELECT id, display_name, municipio, contact_preference, contact_info,
                   avatar_url, is_admin, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn create(&self, id: Uuid, new_profile: &NewProfile) -> Result<Profile> {
        info!("Creating profile for user: {}", id);

        let row = sqlx::query(
            r#"
            INSERT INTO profiles (id, display_name, municipio, contact_preference,
                                  contact_info, avatar_url, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id, display_name, municipio, contact_preference, contact_info,
                      avatar_url, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&new_profile.display_name)
        .bind(new_profile.municipio.as_str())
        .bind(new_profile.contact_preference.as_str())
        .bind(&new_profile.contact_info)
        .bind(&new_profile.avatar_url)
        .fetch_one(&self.pool)
        .await?;

        profile_from_row(&row)
    }

    async fn update(&self, id: Uuid, changes: &UpdateProfile) -> Result<Profile> {
        info!("Updating profile for user: {}", id);

        let row = sqlx::query(
            r#"
            UPDATE profiles
            SET display_name = COALESCE($2, display_name),
                municipio = COALESCE($3, municipio),
                contact_preference = COALESCE($4, contact_preference),
                contact_info = COALESCE($5, contact_info),
                avatar_url = COALESCE($6, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, display_name, municipio, contact_preference, contact_info,
                      avatar_url, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.display_name)
        .bind(changes.municipio.map(|m| m.as_str()))
        .bind(changes.contact_preference.map(|c| c.as_str()))
        .bind(&changes.contact_info)
        .bind(&changes.avatar_url)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => profile_from_row(&row),
            None => Err(anyhow::anyhow!("Profile {} not found", id)),
        }
    }
}
