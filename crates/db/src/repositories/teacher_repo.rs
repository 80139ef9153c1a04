//! Repository for the `teachers` table.

use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher};

const COLUMNS: &str = "id, email, first_name, last_name, created_at";

/// Provides lookups and registration for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Register a teacher. A duplicate cedula fails with a unique violation.
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers (id, email, first_name, last_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(&input.cedula)
            .bind(&input.email)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by cedula.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE id = $1");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the teacher unless the cedula exists. Returns `true` if inserted.
    pub async fn create_if_missing(pool: &PgPool, input: &CreateTeacher) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO teachers (id, email, first_name, last_name)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&input.cedula)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
