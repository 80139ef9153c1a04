//! Evaluation plan report: one row per evaluation item, gated on export rules.

use super::canvas::Canvas;
use super::{draw_cell, Column, ReportHeader, ReportLayout, ReportSource, RowPosition};
use crate::catalog::{label, EVALUATION_TYPES, INSTRUMENTS};
use crate::types::{Date, DbId};
use crate::weights::{can_export, ExportBlockedError, ExportItem};

pub static LAYOUT: ReportLayout = ReportLayout {
    title: "Plan de Evaluación",
    columns: &[
        Column { heading: "Objetivos", x: 40.0 },
        Column { heading: "Habilidades", x: 185.0 },
        Column { heading: "Instrumento", x: 380.0 },
        Column { heading: "Tipo", x: 505.0 },
        Column { heading: "Peso", x: 590.0 },
        Column { heading: "Fecha", x: 645.0 },
    ],
};

/// One evaluation item as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: DbId,
    /// Instrument code; printed as its label.
    pub instrument: String,
    /// Evaluation type code; printed as its label.
    pub evaluation_type: String,
    pub skills: String,
    pub weight: i16,
    pub planned_date: Date,
    /// Titles of the objectives linked to the item.
    pub objective_titles: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EvaluationPlanReport {
    pub header: ReportHeader,
    pub plan_name: String,
    pub items: Vec<ItemRow>,
}

impl EvaluationPlanReport {
    /// The items as the export gate sees them.
    pub fn export_items(&self) -> Vec<ExportItem> {
        self.items
            .iter()
            .map(|item| ExportItem {
                id: item.id,
                weight: item.weight,
                description: item.skills.clone(),
                objective_count: item.objective_titles.len(),
            })
            .collect()
    }
}

impl ReportSource for EvaluationPlanReport {
    type Row = ItemRow;

    fn header_fields(&self) -> &ReportHeader {
        &self.header
    }

    fn rows(&self) -> &[ItemRow] {
        &self.items
    }

    fn subtitle(&self) -> Option<&str> {
        Some(&self.plan_name)
    }

    fn draw_row(&self, row: &ItemRow, position: RowPosition, canvas: &mut Canvas) {
        draw_cell(canvas, position, 40.0, &row.objective_titles.join(", "), 26, 5, false);
        draw_cell(canvas, position, 185.0, &row.skills, 36, 5, false);
        draw_cell(canvas, position, 380.0, label(INSTRUMENTS, &row.instrument), 22, 1, true);
        draw_cell(
            canvas,
            position,
            505.0,
            label(EVALUATION_TYPES, &row.evaluation_type),
            14,
            1,
            true,
        );
        draw_cell(canvas, position, 590.0, &format!("{}%", row.weight), 6, 1, true);
        draw_cell(
            canvas,
            position,
            645.0,
            &row.planned_date.format("%d/%m/%Y").to_string(),
            12,
            1,
            true,
        );
    }

    fn check_exportable(&self) -> Result<(), ExportBlockedError> {
        can_export(&self.export_items())
    }
}
