//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use plandoc_db::models::course_unit::CreateCourseUnit;
use plandoc_db::models::evaluation_item::CreateEvaluationItem;
use plandoc_db::models::evaluation_plan::{CreateEvaluationPlan, EvaluationPlan};
use plandoc_db::models::learning_objective::{CreateLearningObjective, LearningObjective};
use plandoc_db::models::learning_plan::{CreateLearningPlan, LearningPlan};
use plandoc_db::models::teacher::CreateTeacher;
use plandoc_db::repositories::{
    CourseUnitRepo, EvaluationPlanRepo, LearningObjectiveRepo, LearningPlanRepo, TeacherRepo,
};
use sqlx::PgPool;

pub const RICARDO: &str = "V-28318187";
pub const VICTORIA: &str = "V-22807503";

pub async fn teacher(pool: &PgPool, cedula: &str) {
    TeacherRepo::create(
        pool,
        &CreateTeacher {
            cedula: cedula.to_string(),
            email: format!("{}@example.com", cedula.to_lowercase()),
            first_name: "Nombre".to_string(),
            last_name: "Apellido".to_string(),
        },
    )
    .await
    .unwrap();
}

pub async fn course_unit(pool: &PgPool, code: &str) {
    CourseUnitRepo::create(
        pool,
        &CreateCourseUnit {
            code: code.to_string(),
            track: 1,
            semester: Some("1".to_string()),
            credits: 4,
            name: "Matemática I".to_string(),
        },
    )
    .await
    .unwrap();
}

pub fn new_plan(group_code: &str) -> CreateLearningPlan {
    CreateLearningPlan {
        group_code: group_code.to_string(),
        course_unit_code: "MAT-1".to_string(),
        campus: "FLO".to_string(),
        shift: "M".to_string(),
        program: "Informática (PNFi)".to_string(),
    }
}

/// Teacher, course unit `MAT-1` and one learning plan owned by the teacher.
pub async fn plan(pool: &PgPool, cedula: &str, group_code: &str) -> LearningPlan {
    if TeacherRepo::find_by_id(pool, cedula).await.unwrap().is_none() {
        teacher(pool, cedula).await;
    }
    if CourseUnitRepo::find_by_code(pool, "MAT-1").await.unwrap().is_none() {
        course_unit(pool, "MAT-1").await;
    }
    LearningPlanRepo::create(pool, cedula, &new_plan(group_code))
        .await
        .unwrap()
}

pub fn new_objective(title: &str) -> CreateLearningObjective {
    CreateLearningObjective {
        title: title.to_string(),
        content: "Contenido".to_string(),
        success_criterion: "Criterio".to_string(),
        strategy: None,
        duration_hours: 4,
        evaluation_item_id: None,
    }
}

pub async fn objective(pool: &PgPool, cedula: &str, group_code: &str, title: &str) -> LearningObjective {
    LearningObjectiveRepo::create(pool, cedula, group_code, &new_objective(title))
        .await
        .unwrap()
}

pub async fn evaluation_plan(pool: &PgPool, cedula: &str, group_code: &str) -> EvaluationPlan {
    EvaluationPlanRepo::create(pool, cedula, group_code, &CreateEvaluationPlan::default())
        .await
        .unwrap()
        .unwrap()
}

pub fn new_item(weight: i16, objective_ids: Vec<i64>) -> CreateEvaluationItem {
    CreateEvaluationItem {
        instrument: None,
        evaluation_type: None,
        skills: format!("Habilidad de peso {weight}"),
        weight: Some(weight),
        planned_date: NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
        objective_ids,
    }
}
