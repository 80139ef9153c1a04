//! Repository for the `evaluation_plans` table.

use std::collections::HashMap;

use plandoc_core::types::DbId;
use plandoc_core::weights::ExportItem;
use sqlx::PgPool;

use crate::models::evaluation_item::EvaluationItemDetail;
use crate::models::evaluation_plan::{
    default_name, CreateEvaluationPlan, EvaluationPlan, EvaluationPlanDetail, UpdateEvaluationPlan,
};
use crate::models::learning_objective::LearningObjective;
use crate::models::report::{ItemReportRow, ReportHeaderRow};
use crate::repositories::{EvaluationItemRepo, LearningObjectiveRepo};

const COLUMNS: &str = "id, learning_plan_code, name, created_at, modified_at";

/// Provides owner-scoped CRUD operations for evaluation plans.
pub struct EvaluationPlanRepo;

impl EvaluationPlanRepo {
    /// Create the evaluation plan of an owned learning plan.
    ///
    /// Returns `None` if the learning plan does not exist for this teacher.
    /// A second plan for the same learning plan fails with a unique violation
    /// on `uq_evaluation_plans_learning_plan_code`.
    pub async fn create(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
        input: &CreateEvaluationPlan,
    ) -> Result<Option<EvaluationPlan>, sqlx::Error> {
        let parent: Option<(String, String)> = sqlx::query_as(
            "SELECT lp.group_code, cu.name FROM learning_plans lp
             JOIN course_units cu ON cu.code = lp.course_unit_code
             WHERE lp.group_code = $1 AND lp.teacher_id = $2",
        )
        .bind(group_code)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;
        let Some((group_code, course_unit_name)) = parent else {
            return Ok(None);
        };

        let name = input
            .name
            .clone()
            .unwrap_or_else(|| default_name(&course_unit_name, &group_code));

        let query = format!(
            "INSERT INTO evaluation_plans (learning_plan_code, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let plan = sqlx::query_as::<_, EvaluationPlan>(&query)
            .bind(&group_code)
            .bind(&name)
            .fetch_one(pool)
            .await?;
        Ok(Some(plan))
    }

    pub async fn find(pool: &PgPool, teacher_id: &str, id: DbId) -> Result<Option<EvaluationPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluation_plans
             WHERE id = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)"
        );
        sqlx::query_as::<_, EvaluationPlan>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// The evaluation plan attached to an owned learning plan, if any.
    pub async fn find_by_learning_plan(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
    ) -> Result<Option<EvaluationPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluation_plans
             WHERE learning_plan_code = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)"
        );
        sqlx::query_as::<_, EvaluationPlan>(&query)
            .bind(group_code)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// List the teacher's evaluation plans, most recently created first.
    pub async fn list(pool: &PgPool, teacher_id: &str) -> Result<Vec<EvaluationPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluation_plans
             WHERE learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EvaluationPlan>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// The plan with its items, each carrying the objectives it assesses.
    pub async fn find_detail(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
    ) -> Result<Option<EvaluationPlanDetail>, sqlx::Error> {
        let Some(plan) = Self::find(pool, teacher_id, id).await? else {
            return Ok(None);
        };

        let items = EvaluationItemRepo::list_by_plan(pool, plan.id).await?;
        let item_ids: Vec<DbId> = items.iter().map(|item| item.id).collect();
        let objectives = LearningObjectiveRepo::list_by_items(pool, &item_ids).await?;

        let mut by_item: HashMap<DbId, Vec<LearningObjective>> = HashMap::new();
        for objective in objectives {
            if let Some(item_id) = objective.evaluation_item_id {
                by_item.entry(item_id).or_default().push(objective);
            }
        }

        let total_weight = items.iter().map(|item| i32::from(item.weight)).sum();
        let items = items
            .into_iter()
            .map(|item| EvaluationItemDetail {
                objectives: by_item.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect();

        Ok(Some(EvaluationPlanDetail {
            plan,
            total_weight,
            items,
        }))
    }

    /// Rename a plan and stamp `modified_at`.
    pub async fn update(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
        input: &UpdateEvaluationPlan,
    ) -> Result<Option<EvaluationPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE evaluation_plans SET
                name = COALESCE($3, name),
                modified_at = NOW()
             WHERE id = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EvaluationPlan>(&query)
            .bind(id)
            .bind(teacher_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plan; its items cascade and their objectives are unlinked.
    pub async fn delete(pool: &PgPool, teacher_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM evaluation_plans
             WHERE id = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)",
        )
        .bind(id)
        .bind(teacher_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Header values for the evaluation plan report, dated by the evaluation plan.
    pub async fn report_header(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
    ) -> Result<Option<ReportHeaderRow>, sqlx::Error> {
        sqlx::query_as::<_, ReportHeaderRow>(
            "SELECT lp.group_code, lp.program, lp.campus, lp.shift,
                    cu.name AS course_unit_name, t.first_name, t.last_name,
                    ep.created_at, ep.modified_at
             FROM evaluation_plans ep
             JOIN learning_plans lp ON lp.group_code = ep.learning_plan_code
             JOIN course_units cu ON cu.code = lp.course_unit_code
             JOIN teachers t ON t.id = lp.teacher_id
             WHERE ep.id = $1 AND lp.teacher_id = $2",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await
    }

    /// Items with their linked objective titles, ordered by planned date.
    pub async fn report_rows(pool: &PgPool, id: DbId) -> Result<Vec<ItemReportRow>, sqlx::Error> {
        sqlx::query_as::<_, ItemReportRow>(
            "SELECT ei.id, ei.instrument, ei.evaluation_type, ei.skills, ei.weight, ei.planned_date,
                    COALESCE(
                        array_agg(lo.title::TEXT ORDER BY lo.id) FILTER (WHERE lo.id IS NOT NULL),
                        '{}'::TEXT[]
                    ) AS objective_titles
             FROM evaluation_items ei
             LEFT JOIN learning_objectives lo ON lo.evaluation_item_id = ei.id
             WHERE ei.evaluation_plan_id = $1
             GROUP BY ei.id
             ORDER BY ei.planned_date, ei.id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Items as the export gate sees them.
    pub async fn export_items(pool: &PgPool, id: DbId) -> Result<Vec<ExportItem>, sqlx::Error> {
        let rows = Self::report_rows(pool, id).await?;
        Ok(rows
            .into_iter()
            .map(|row| ExportItem {
                id: row.id,
                weight: row.weight,
                objective_count: row.objective_titles.len(),
                description: row.skills,
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Stamp `modified_at` within an existing transaction.
    pub(crate) async fn touch(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE evaluation_plans SET modified_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
