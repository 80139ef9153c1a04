//! Repository for the `learning_plans` table.

use sqlx::PgPool;

use crate::models::learning_plan::{
    CreateLearningPlan, LearningPlan, LearningPlanDetail, UpdateLearningPlan,
};
use crate::models::report::{ObjectiveReportRow, ReportHeaderRow};
use crate::repositories::LearningObjectiveRepo;

const COLUMNS: &str =
    "group_code, teacher_id, course_unit_code, campus, shift, program, created_at, modified_at";

/// Provides owner-scoped CRUD operations for learning plans.
///
/// Every method takes the session teacher's cedula; plans of other teachers
/// behave as if they did not exist.
pub struct LearningPlanRepo;

impl LearningPlanRepo {
    /// Insert a new learning plan owned by `teacher_id`.
    pub async fn create(
        pool: &PgPool,
        teacher_id: &str,
        input: &CreateLearningPlan,
    ) -> Result<LearningPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_plans (group_code, teacher_id, course_unit_code, campus, shift, program)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(&input.group_code)
            .bind(teacher_id)
            .bind(&input.course_unit_code)
            .bind(&input.campus)
            .bind(&input.shift)
            .bind(&input.program)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
    ) -> Result<Option<LearningPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_plans WHERE group_code = $1 AND teacher_id = $2"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(group_code)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// The plan with its objectives, or `None` if not owned.
    pub async fn find_detail(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
    ) -> Result<Option<LearningPlanDetail>, sqlx::Error> {
        let Some(plan) = Self::find(pool, teacher_id, group_code).await? else {
            return Ok(None);
        };
        let objectives = LearningObjectiveRepo::list_by_plan(pool, &plan.group_code).await?;
        Ok(Some(LearningPlanDetail { plan, objectives }))
    }

    /// List the teacher's plans, most recently created first.
    pub async fn list(pool: &PgPool, teacher_id: &str) -> Result<Vec<LearningPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_plans WHERE teacher_id = $1 ORDER BY created_at DESC, group_code"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// Update a plan and stamp `modified_at`. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
        input: &UpdateLearningPlan,
    ) -> Result<Option<LearningPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE learning_plans SET
                course_unit_code = COALESCE($3, course_unit_code),
                campus = COALESCE($4, campus),
                shift = COALESCE($5, shift),
                program = COALESCE($6, program),
                modified_at = NOW()
             WHERE group_code = $1 AND teacher_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(group_code)
            .bind(teacher_id)
            .bind(&input.course_unit_code)
            .bind(&input.campus)
            .bind(&input.shift)
            .bind(&input.program)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plan; objectives, the evaluation plan and its items cascade.
    pub async fn delete(pool: &PgPool, teacher_id: &str, group_code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learning_plans WHERE group_code = $1 AND teacher_id = $2")
            .bind(group_code)
            .bind(teacher_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Header values for the learning plan report.
    pub async fn report_header(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
    ) -> Result<Option<ReportHeaderRow>, sqlx::Error> {
        sqlx::query_as::<_, ReportHeaderRow>(
            "SELECT lp.group_code, lp.program, lp.campus, lp.shift,
                    cu.name AS course_unit_name, t.first_name, t.last_name,
                    lp.created_at, lp.modified_at
             FROM learning_plans lp
             JOIN course_units cu ON cu.code = lp.course_unit_code
             JOIN teachers t ON t.id = lp.teacher_id
             WHERE lp.group_code = $1 AND lp.teacher_id = $2",
        )
        .bind(group_code)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await
    }

    /// Objective rows for the learning plan report, in creation order.
    pub async fn report_rows(pool: &PgPool, group_code: &str) -> Result<Vec<ObjectiveReportRow>, sqlx::Error> {
        sqlx::query_as::<_, ObjectiveReportRow>(
            "SELECT title, content, success_criterion, strategy, duration_hours
             FROM learning_objectives
             WHERE learning_plan_code = $1
             ORDER BY id",
        )
        .bind(group_code)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Stamp `modified_at` within an existing transaction.
    pub(crate) async fn touch(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        group_code: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE learning_plans SET modified_at = NOW() WHERE group_code = $1")
            .bind(group_code)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Lock an owned plan row for the rest of the transaction.
    ///
    /// Returns `false` if the plan does not exist for this teacher.
    pub(crate) async fn lock_owned(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        teacher_id: &str,
        group_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT group_code FROM learning_plans
             WHERE group_code = $1 AND teacher_id = $2
             FOR UPDATE",
        )
        .bind(group_code)
        .bind(teacher_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.is_some())
    }
}
