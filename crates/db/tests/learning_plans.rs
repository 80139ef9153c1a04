//! Learning plan and objective repositories: ownership scoping, cascades
//! and `modified_at` stamping.

mod common;

use assert_matches::assert_matches;
use plandoc_db::models::learning_objective::UpdateLearningObjective;
use plandoc_db::models::learning_plan::UpdateLearningPlan;
use plandoc_db::repositories::{LearningObjectiveRepo, LearningPlanRepo};
use plandoc_db::ItemWriteError;
use sqlx::PgPool;

use common::{RICARDO, VICTORIA};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_crud(pool: PgPool) {
    let plan = common::plan(&pool, RICARDO, "INF-(MAT-1)-FLO-M (2025-2026)").await;
    assert!(plan.modified_at.is_none());
    assert_eq!(plan.teacher_id, RICARDO);

    let listed = LearningPlanRepo::list(&pool, RICARDO).await.unwrap();
    assert_eq!(listed.len(), 1);

    let updated = LearningPlanRepo::update(
        &pool,
        RICARDO,
        &plan.group_code,
        &UpdateLearningPlan {
            shift: Some("N".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.shift, "N");
    assert_eq!(updated.campus, "FLO");
    assert!(updated.modified_at.is_some());

    assert!(LearningPlanRepo::delete(&pool, RICARDO, &plan.group_code).await.unwrap());
    assert!(LearningPlanRepo::find(&pool, RICARDO, &plan.group_code).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_teachers_plans_are_invisible(pool: PgPool) {
    let plan = common::plan(&pool, RICARDO, "G-1").await;
    common::teacher(&pool, VICTORIA).await;
    let objective = common::objective(&pool, RICARDO, "G-1", "Funciones").await;

    assert!(LearningPlanRepo::list(&pool, VICTORIA).await.unwrap().is_empty());
    assert!(LearningPlanRepo::find(&pool, VICTORIA, &plan.group_code).await.unwrap().is_none());
    assert!(LearningPlanRepo::update(&pool, VICTORIA, &plan.group_code, &UpdateLearningPlan::default())
        .await
        .unwrap()
        .is_none());
    assert!(!LearningPlanRepo::delete(&pool, VICTORIA, &plan.group_code).await.unwrap());

    assert!(LearningObjectiveRepo::find(&pool, VICTORIA, objective.id).await.unwrap().is_none());
    assert!(!LearningObjectiveRepo::delete(&pool, VICTORIA, objective.id).await.unwrap());
    assert_matches!(
        LearningObjectiveRepo::create(&pool, VICTORIA, "G-1", &common::new_objective("Intrusa")).await,
        Err(ItemWriteError::NotFound { entity: "LearningPlan", .. })
    );

    // Still there for the owner.
    assert!(LearningPlanRepo::find(&pool, RICARDO, "G-1").await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_objective_writes_stamp_the_plan(pool: PgPool) {
    common::plan(&pool, RICARDO, "G-1").await;

    let objective = common::objective(&pool, RICARDO, "G-1", "Límites").await;
    assert_eq!(objective.strategy, "CL");
    let after_create = LearningPlanRepo::find(&pool, RICARDO, "G-1").await.unwrap().unwrap();
    assert!(after_create.modified_at.is_some());

    let updated = LearningObjectiveRepo::update(
        &pool,
        RICARDO,
        objective.id,
        &UpdateLearningObjective {
            duration_hours: Some(9),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.duration_hours, 9);
    assert_eq!(updated.title, "Límites");

    let detail = LearningPlanRepo::find_detail(&pool, RICARDO, "G-1").await.unwrap().unwrap();
    assert_eq!(detail.objectives.len(), 1);

    assert!(LearningObjectiveRepo::delete(&pool, RICARDO, objective.id).await.unwrap());
    assert!(LearningObjectiveRepo::list_by_plan(&pool, "G-1").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_a_plan_cascades(pool: PgPool) {
    common::plan(&pool, RICARDO, "G-1").await;
    let objective = common::objective(&pool, RICARDO, "G-1", "Funciones").await;
    let evaluation_plan = common::evaluation_plan(&pool, RICARDO, "G-1").await;

    assert!(LearningPlanRepo::delete(&pool, RICARDO, "G-1").await.unwrap());

    let objectives: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM learning_objectives WHERE id = $1")
        .bind(objective.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(objectives.0, 0);
    let plans: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM evaluation_plans WHERE id = $1")
        .bind(evaluation_plan.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(plans.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duration_outside_range_is_rejected_by_the_schema(pool: PgPool) {
    common::plan(&pool, RICARDO, "G-1").await;
    let mut input = common::new_objective("Demasiado");
    input.duration_hours = 12;

    let err = LearningObjectiveRepo::create(&pool, RICARDO, "G-1", &input)
        .await
        .unwrap_err();
    assert_matches!(err, ItemWriteError::Database(sqlx::Error::Database(ref db)) if db.code().as_deref() == Some("23514"));
}
