//! Rows backing the PDF reports.

use plandoc_core::catalog::{label, CAMPUSES, SHIFTS};
use plandoc_core::identity::full_name;
use plandoc_core::report::evaluation_plan::ItemRow;
use plandoc_core::report::learning_plan::ObjectiveRow;
use plandoc_core::report::ReportHeader;
use plandoc_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// Everything the page header needs, joined from plan, course unit and teacher.
///
/// `created_at`/`modified_at` are those of the plan being reported.
#[derive(Debug, Clone, FromRow)]
pub struct ReportHeaderRow {
    pub group_code: String,
    pub program: String,
    pub campus: String,
    pub shift: String,
    pub course_unit_name: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub modified_at: Option<Timestamp>,
}

impl From<ReportHeaderRow> for ReportHeader {
    fn from(row: ReportHeaderRow) -> Self {
        ReportHeader {
            program: row.program,
            campus: label(CAMPUSES, &row.campus).to_string(),
            shift: label(SHIFTS, &row.shift).to_string(),
            course_unit: row.course_unit_name,
            group_code: row.group_code,
            teacher: full_name(&row.first_name, &row.last_name),
            date: ReportHeader::format_date(row.created_at, row.modified_at),
        }
    }
}

/// One objective as printed on the learning plan report.
#[derive(Debug, Clone, FromRow)]
pub struct ObjectiveReportRow {
    pub title: String,
    pub content: String,
    pub success_criterion: String,
    pub strategy: String,
    pub duration_hours: i16,
}

impl From<ObjectiveReportRow> for ObjectiveRow {
    fn from(row: ObjectiveReportRow) -> Self {
        ObjectiveRow {
            title: row.title,
            content: row.content,
            success_criterion: row.success_criterion,
            strategy: row.strategy,
            duration_hours: row.duration_hours,
        }
    }
}

/// One evaluation item with its linked objective titles aggregated.
#[derive(Debug, Clone, FromRow)]
pub struct ItemReportRow {
    pub id: DbId,
    pub instrument: String,
    pub evaluation_type: String,
    pub skills: String,
    pub weight: i16,
    pub planned_date: Date,
    pub objective_titles: Vec<String>,
}

impl From<ItemReportRow> for ItemRow {
    fn from(row: ItemReportRow) -> Self {
        ItemRow {
            id: row.id,
            instrument: row.instrument,
            evaluation_type: row.evaluation_type,
            skills: row.skills,
            weight: row.weight,
            planned_date: row.planned_date,
            objective_titles: row.objective_titles,
        }
    }
}
