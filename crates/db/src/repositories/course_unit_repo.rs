//! Repository for the `course_units` table.

use sqlx::PgPool;

use crate::models::course_unit::{CourseUnit, CreateCourseUnit, UpdateCourseUnit};

const COLUMNS: &str = "code, track, semester, credits, name, created_at";

/// Provides CRUD operations for course units. Course units are shared by all
/// teachers.
pub struct CourseUnitRepo;

impl CourseUnitRepo {
    /// Insert a new course unit. `semester` defaults to `NA`.
    pub async fn create(pool: &PgPool, input: &CreateCourseUnit) -> Result<CourseUnit, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_units (code, track, semester, credits, name)
             VALUES ($1, $2, COALESCE($3, 'NA'), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseUnit>(&query)
            .bind(&input.code)
            .bind(input.track)
            .bind(&input.semester)
            .bind(input.credits)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<CourseUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM course_units WHERE code = $1");
        sqlx::query_as::<_, CourseUnit>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List course units ordered by track, semester and code.
    pub async fn list(pool: &PgPool) -> Result<Vec<CourseUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM course_units ORDER BY track, semester, code");
        sqlx::query_as::<_, CourseUnit>(&query).fetch_all(pool).await
    }

    /// Update a course unit. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `code` exists.
    pub async fn update(
        pool: &PgPool,
        code: &str,
        input: &UpdateCourseUnit,
    ) -> Result<Option<CourseUnit>, sqlx::Error> {
        let query = format!(
            "UPDATE course_units SET
                track = COALESCE($2, track),
                semester = COALESCE($3, semester),
                credits = COALESCE($4, credits),
                name = COALESCE($5, name)
             WHERE code = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseUnit>(&query)
            .bind(code)
            .bind(input.track)
            .bind(&input.semester)
            .bind(input.credits)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course unit and, by cascade, every learning plan using it.
    pub async fn delete(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM course_units WHERE code = $1")
            .bind(code)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert the course unit unless the code exists. Returns `true` if inserted.
    pub async fn create_if_missing(pool: &PgPool, input: &CreateCourseUnit) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO course_units (code, track, semester, credits, name)
             VALUES ($1, $2, COALESCE($3, 'NA'), $4, $5)
             ON CONFLICT (code) DO NOTHING",
        )
        .bind(&input.code)
        .bind(input.track)
        .bind(&input.semester)
        .bind(input.credits)
        .bind(&input.name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
