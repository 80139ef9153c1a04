//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Plan, objective and item
//! queries take the session teacher's id and only see that teacher's rows.

pub mod course_unit_repo;
pub mod evaluation_item_repo;
pub mod evaluation_plan_repo;
pub mod learning_objective_repo;
pub mod learning_plan_repo;
pub mod teacher_repo;

pub use course_unit_repo::CourseUnitRepo;
pub use evaluation_item_repo::EvaluationItemRepo;
pub use evaluation_plan_repo::EvaluationPlanRepo;
pub use learning_objective_repo::LearningObjectiveRepo;
pub use learning_plan_repo::LearningPlanRepo;
pub use teacher_repo::TeacherRepo;
