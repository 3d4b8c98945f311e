//! HTTP request handlers.

pub mod attendance_handler;
pub mod auth_handler;
pub mod department_handler;
pub mod employee_handler;
pub mod leave_handler;
pub mod position_handler;
pub mod salary_handler;
pub mod user_handler;

pub use attendance_handler::attendance_routes;
pub use auth_handler::{auth_me_routes, auth_routes};
pub use department_handler::department_routes;
pub use employee_handler::employee_routes;
pub use leave_handler::leave_routes;
pub use position_handler::position_routes;
pub use salary_handler::salary_routes;
pub use user_handler::user_routes;
