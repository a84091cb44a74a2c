mod api;
mod todo;

pub use api::{
    HealthResponse, VALIDATION_PROBLEM_TITLE, VALIDATION_PROBLEM_TYPE, ValidationProblem,
};
pub use todo::{Todo, parse_due_date};
