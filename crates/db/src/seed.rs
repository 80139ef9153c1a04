//! Demo data for local development.
//!
//! [`seed_demo_data`] is idempotent: every row is looked up by its natural
//! key first and only inserted when missing, so running it twice leaves the
//! database unchanged. [`clear_all`] removes every row in dependency order.

use chrono::{Datelike, Days, Utc};
use plandoc_core::catalog::{CAMPUSES, EVALUATION_TYPES, INSTRUMENTS, SHIFTS, STRATEGIES};
use plandoc_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::error::ItemWriteError;
use crate::models::course_unit::CreateCourseUnit;
use crate::models::evaluation_item::CreateEvaluationItem;
use crate::models::evaluation_plan::CreateEvaluationPlan;
use crate::models::learning_objective::CreateLearningObjective;
use crate::models::teacher::CreateTeacher;
use crate::repositories::{
    CourseUnitRepo, EvaluationItemRepo, EvaluationPlanRepo, LearningObjectiveRepo, TeacherRepo,
};

pub const PROGRAM: &str = "Informática (PNFi)";

/// `(cedula, email, first name, last name)`
const TEACHERS: &[(&str, &str, &str, &str)] = &[
    ("V-28318187", "sidesrev@gmail.com", "Ricardo", "Marin"),
    ("V-22807503", "vhoggin0@free.fr", "Victoria", "Hoggin"),
    ("V-26333054", "jperez1@eepurl.com", "José", "Pérez"),
];

/// `(code, track, semester, credits, name)`
const COURSE_UNITS: &[(&str, i16, &str, i16, &str)] = &[
    ("MAT-1", 1, "1", 4, "Matemática I"),
    ("FC-1", 1, "2", 2, "Formación Crítica I"),
    ("AYP-0", 2, "1", 3, "Algorítmica y Programación"),
];

/// `(title, content, success criterion)`
type ObjectiveSeed = (&'static str, &'static str, &'static str);

/// `(skills, weight, indexes of the objectives it assesses)`
type ItemSeed = (&'static str, i16, &'static [usize]);

struct PlanSeed {
    teacher: &'static str,
    course_unit: &'static str,
    campus: usize,
    shift: usize,
    objectives: &'static [ObjectiveSeed],
    items: &'static [ItemSeed],
}

const PLANS: &[PlanSeed] = &[
    PlanSeed {
        teacher: "V-28318187",
        course_unit: "MAT-1",
        campus: 0,
        shift: 2,
        objectives: &[
            (
                "Conceptos básicos del álgebra",
                "Definir y aplicar los conceptos de variables, expresiones algebraicas, ecuaciones y desigualdades.",
                "Resolver correctamente ecuaciones y desigualdades lineales y cuadráticas.",
            ),
            (
                "Operaciones con funciones",
                "Realizar operaciones de suma, resta, multiplicación, división y composición de funciones.",
                "Calcular y simplificar correctamente las operaciones con funciones dadas.",
            ),
            (
                "Límite de una función",
                "Calcular límites de funciones algebraicas y trascendentes, utilizando diferentes técnicas.",
                "Determinar la existencia y el valor de límites de funciones en puntos y en el infinito.",
            ),
            (
                "Derivadas de funciones",
                "Aplicar las reglas de derivación para calcular derivadas de funciones algebraicas, trigonométricas, exponenciales y logarítmicas.",
                "Calcular derivadas de funciones utilizando la regla de la cadena, la regla del producto y la regla del cociente.",
            ),
            (
                "Integral definida",
                "Calcular integrales definidas utilizando el teorema fundamental del cálculo.",
                "Aplicar la integral definida para calcular áreas bajo curvas y volúmenes de sólidos de revolución.",
            ),
            (
                "Integrales definidas: problemas",
                "Resolver problemas de integrales definidas utilizando el teorema fundamental del cálculo.",
                "Aplicar la integral definida para calcular áreas bajo curvas y volúmenes de sólidos de revolución.",
            ),
            (
                "Aplicación de cálculo",
                "Aplicar los conceptos de límites, derivadas e integrales para resolver problemas de optimización, tasas de cambio y acumulación.",
                "Plantear y resolver problemas de aplicación de cálculo en diferentes contextos.",
            ),
        ],
        items: &[
            ("Resolución de ecuaciones y desigualdades algebraicas", 20, &[0]),
            ("Operaciones con funciones (suma, resta, multiplicación, división, composición)", 20, &[1]),
            ("Cálculo de límites de funciones", 15, &[2]),
            ("Cálculo de derivadas de funciones (reglas básicas y derivadas de orden superior)", 20, &[3]),
            ("Cálculo de integrales definidas", 25, &[4, 5]),
        ],
    },
    PlanSeed {
        teacher: "V-22807503",
        course_unit: "FC-1",
        campus: 1,
        shift: 1,
        objectives: &[
            (
                "Argumentos",
                "Distinguir entre opiniones y argumentos, reconocer la estructura de un argumento y evaluar su validez.",
                "Analizar textos y discursos identificando la presencia de argumentos y evaluando su solidez.",
            ),
            (
                "Credibilidad de las fuentes",
                "Aplicar criterios para evaluar la confiabilidad y relevancia de las fuentes de información.",
                "Seleccionar fuentes de información confiables para la investigación y el análisis.",
            ),
            (
                "Sesgos cognitivos",
                "Identificar los principales sesgos cognitivos y comprender su influencia en el pensamiento y la toma de decisiones.",
                "Aplicar estrategias para mitigar el impacto de los sesgos cognitivos en el análisis de información y la resolución de problemas.",
            ),
            (
                "Problemas sociales",
                "Analizar problemas sociales desde una perspectiva crítica, considerando diferentes puntos de vista y evidencias.",
                "Desarrollar soluciones creativas e informadas a problemas sociales, utilizando el pensamiento crítico como herramienta fundamental.",
            ),
        ],
        items: &[
            ("Análisis y evaluación de argumentos en textos y discursos", 25, &[0]),
            ("Evaluación de la credibilidad y relevancia de fuentes de información", 25, &[1]),
            ("Identificación y análisis de sesgos cognitivos en situaciones reales", 25, &[2]),
            ("Aplicación del pensamiento crítico en la resolución de problemas sociales", 25, &[3]),
        ],
    },
    PlanSeed {
        teacher: "V-26333054",
        course_unit: "AYP-0",
        campus: 2,
        shift: 0,
        objectives: &[
            (
                "Fundamentos de la algorítmica",
                "Definir y aplicar conceptos como algoritmos, variables, estructuras de control y tipos de datos.",
                "Diseñar algoritmos para resolver problemas sencillos, utilizando diagramas de flujo y pseudocódigo.",
            ),
            (
                "Estructuras de control",
                "Utilizar estructuras de control secuenciales, condicionales (if, else) y repetitivas (for, while) para controlar el flujo de un programa.",
                "Implementar programas que utilicen estructuras de control para resolver problemas más complejos.",
            ),
            (
                "Funciones",
                "Definir y utilizar funciones para modularizar el código y reutilizar funcionalidades.",
                "Desarrollar programas que utilicen funciones para dividir problemas complejos en tareas más pequeñas.",
            ),
            (
                "Arreglos y listas",
                "Utilizar arreglos y listas para almacenar y manipular colecciones de datos.",
                "Implementar programas que utilicen arreglos y listas para resolver problemas de búsqueda, ordenamiento y manipulación de datos.",
            ),
            (
                "Búsqueda y ordenamiento",
                "Comprender e implementar algoritmos de búsqueda lineal y binaria, así como algoritmos de ordenamiento como burbuja, selección e inserción.",
                "Comparar la eficiencia de diferentes algoritmos de búsqueda y ordenamiento para resolver problemas específicos.",
            ),
        ],
        items: &[
            ("Diseño de algoritmos en pseudocódigo y diagramas de flujo", 15, &[0]),
            ("Implementación de programas con estructuras de control (if, else, for, while)", 20, &[1]),
            ("Desarrollo de programas utilizando funciones y modularización", 20, &[2]),
            ("Manejo y manipulación de arreglos y listas en programas", 20, &[3]),
            ("Resolución de problemas prácticos aplicando los conceptos de programación", 25, &[4]),
        ],
    },
];

/// Rows inserted by one [`seed_demo_data`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub teachers: usize,
    pub course_units: usize,
    pub learning_plans: usize,
    pub objectives: usize,
    pub evaluation_plans: usize,
    pub items: usize,
}

/// Group code of a seeded plan, e.g. `INF-(MAT-1)-FLO-M (2025-2026)`.
pub fn group_code(course_unit: &str, campus: &str, shift: &str, year: i32) -> String {
    format!("INF-({course_unit})-{campus}-{shift} ({year}-{})", year + 1)
}

/// Insert the demo teachers, course units and fully-built plans.
pub async fn seed_demo_data(pool: &PgPool) -> Result<SeedSummary, ItemWriteError> {
    let mut summary = SeedSummary::default();

    for &(cedula, email, first_name, last_name) in TEACHERS {
        let input = CreateTeacher {
            cedula: cedula.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        };
        if TeacherRepo::create_if_missing(pool, &input).await? {
            summary.teachers += 1;
            tracing::info!(cedula, "Teacher created");
        }
    }

    for &(code, track, semester, credits, name) in COURSE_UNITS {
        let input = CreateCourseUnit {
            code: code.into(),
            track,
            semester: Some(semester.into()),
            credits,
            name: name.into(),
        };
        if CourseUnitRepo::create_if_missing(pool, &input).await? {
            summary.course_units += 1;
            tracing::info!(code, "Course unit created");
        }
    }

    let year = Utc::now().year();
    let mut counter = 0usize;

    for plan in PLANS {
        let code = group_code(plan.course_unit, CAMPUSES[plan.campus].0, SHIFTS[plan.shift].0, year);

        let inserted = sqlx::query(
            "INSERT INTO learning_plans (group_code, teacher_id, course_unit_code, campus, shift, program)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (group_code) DO NOTHING",
        )
        .bind(&code)
        .bind(plan.teacher)
        .bind(plan.course_unit)
        .bind(CAMPUSES[plan.campus].0)
        .bind(SHIFTS[plan.shift].0)
        .bind(PROGRAM)
        .execute(pool)
        .await?;
        if inserted.rows_affected() > 0 {
            summary.learning_plans += 1;
            tracing::info!(group_code = %code, "Learning plan created");
        }

        let mut objective_ids: Vec<DbId> = Vec::with_capacity(plan.objectives.len());
        for &(title, content, success_criterion) in plan.objectives {
            let existing: Option<(DbId,)> = sqlx::query_as(
                "SELECT id FROM learning_objectives WHERE learning_plan_code = $1 AND title = $2",
            )
            .bind(&code)
            .bind(title)
            .fetch_optional(pool)
            .await?;

            let id = match existing {
                Some((id,)) => id,
                None => {
                    let input = CreateLearningObjective {
                        title: title.into(),
                        content: content.into(),
                        success_criterion: success_criterion.into(),
                        strategy: Some(STRATEGIES[counter % STRATEGIES.len()].0.into()),
                        duration_hours: 2 + (counter % 8) as i16,
                        evaluation_item_id: None,
                    };
                    summary.objectives += 1;
                    LearningObjectiveRepo::create(pool, plan.teacher, &code, &input).await?.id
                }
            };
            objective_ids.push(id);
            counter += 1;
        }

        let evaluation_plan =
            match EvaluationPlanRepo::find_by_learning_plan(pool, plan.teacher, &code).await? {
                Some(existing) => existing,
                None => {
                    let created = EvaluationPlanRepo::create(
                        pool,
                        plan.teacher,
                        &code,
                        &CreateEvaluationPlan::default(),
                    )
                    .await?
                    .ok_or_else(|| ItemWriteError::not_found("LearningPlan", &code))?;
                    summary.evaluation_plans += 1;
                    created
                }
            };

        for (index, &(skills, weight, linked)) in plan.items.iter().enumerate() {
            let existing: Option<(DbId,)> = sqlx::query_as(
                "SELECT id FROM evaluation_items WHERE evaluation_plan_id = $1 AND skills = $2",
            )
            .bind(evaluation_plan.id)
            .bind(skills)
            .fetch_optional(pool)
            .await?;
            if existing.is_some() {
                continue;
            }

            let input = CreateEvaluationItem {
                instrument: Some(INSTRUMENTS[(counter + index) % INSTRUMENTS.len()].0.into()),
                evaluation_type: Some(EVALUATION_TYPES[index % EVALUATION_TYPES.len()].0.into()),
                skills: skills.into(),
                weight: Some(weight),
                planned_date: planned_date(index),
                objective_ids: linked.iter().map(|&i| objective_ids[i]).collect(),
            };
            EvaluationItemRepo::create(pool, plan.teacher, evaluation_plan.id, &input).await?;
            summary.items += 1;
        }
    }

    Ok(summary)
}

/// Items are spread two weeks apart from April 1st, 2025.
fn planned_date(index: usize) -> Date {
    let start = Date::from_ymd_opt(2025, 4, 1).unwrap_or_default();
    start
        .checked_add_days(Days::new(14 * index as u64))
        .unwrap_or(start)
}

/// Delete every row, children first. Returns the number of rows removed.
pub async fn clear_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut removed = 0;
    for table in [
        "learning_objectives",
        "evaluation_items",
        "evaluation_plans",
        "learning_plans",
        "course_units",
        "teachers",
    ] {
        let result = sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
        tracing::info!(table, rows = result.rows_affected(), "Cleared table");
        removed += result.rows_affected();
    }
    tx.commit().await?;
    Ok(removed)
}
