//! Learning plan report: one row per learning objective.

use super::canvas::Canvas;
use super::{draw_cell, Column, ReportHeader, ReportLayout, ReportSource, RowPosition};
use crate::catalog::{label, STRATEGIES};

pub static LAYOUT: ReportLayout = ReportLayout {
    title: "Plan de Aprendizaje",
    columns: &[
        Column { heading: "Objetivo", x: 40.0 },
        Column { heading: "Contenido", x: 165.0 },
        Column { heading: "Criterio de logro", x: 360.0 },
        Column { heading: "Estrategia", x: 555.0 },
        Column { heading: "Horas", x: 690.0 },
    ],
};

/// One learning objective as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveRow {
    pub title: String,
    pub content: String,
    pub success_criterion: String,
    /// Strategy code; printed as its label.
    pub strategy: String,
    pub duration_hours: i16,
}

#[derive(Debug, Clone)]
pub struct LearningPlanReport {
    pub header: ReportHeader,
    pub objectives: Vec<ObjectiveRow>,
}

impl ReportSource for LearningPlanReport {
    type Row = ObjectiveRow;

    fn header_fields(&self) -> &ReportHeader {
        &self.header
    }

    fn rows(&self) -> &[ObjectiveRow] {
        &self.objectives
    }

    fn draw_row(&self, row: &ObjectiveRow, position: RowPosition, canvas: &mut Canvas) {
        draw_cell(canvas, position, 40.0, &row.title, 22, 4, false);
        draw_cell(canvas, position, 165.0, &row.content, 36, 5, false);
        draw_cell(canvas, position, 360.0, &row.success_criterion, 36, 5, false);
        draw_cell(canvas, position, 555.0, label(STRATEGIES, &row.strategy), 24, 1, true);
        draw_cell(
            canvas,
            position,
            690.0,
            &format!("{} h", row.duration_hours),
            10,
            1,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use lopdf::Document;

    use super::*;
    use crate::report::{generate_report, ReportTemplate};

    fn objective(i: usize) -> ObjectiveRow {
        ObjectiveRow {
            title: format!("Objetivo {i}"),
            content: "Conjuntos numéricos, operaciones y propiedades".into(),
            success_criterion: "Resuelve ejercicios aplicando las propiedades".into(),
            strategy: "AP".into(),
            duration_hours: 4,
        }
    }

    #[test]
    fn prints_strategy_label_and_hours() {
        let report = LearningPlanReport {
            header: ReportHeader::default(),
            objectives: vec![objective(1)],
        };
        let mut canvas = Canvas::new();
        let position = RowPosition { index: 0, number: 1, top: 480.0 };
        report.draw_row(&report.objectives[0], position, &mut canvas);

        let bytes = canvas.encode().unwrap();
        let stream = String::from_utf8_lossy(&bytes);
        // "Aprendizaje basado en problemas" does not fit in 24 characters.
        assert!(stream.contains("(Aprendizaje basado en...)"));
        assert!(stream.contains("(4 h)"));
    }

    #[test]
    fn seven_objectives_span_two_pages() {
        let report = LearningPlanReport {
            header: ReportHeader {
                program: "Informática (PNFi)".into(),
                course_unit: "Matemática I".into(),
                ..Default::default()
            },
            objectives: (1..=7).map(objective).collect(),
        };
        let template = ReportTemplate::builtin(&LAYOUT).unwrap();
        let bytes = generate_report(&report, &template).unwrap();
        assert_eq!(Document::load_mem(&bytes).unwrap().get_pages().len(), 2);
    }
}
