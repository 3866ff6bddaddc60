pub mod attendance;
pub mod auth;
pub mod batches;
pub mod courses;
pub mod portal;
pub mod progress;
pub mod staff;
pub mod students;
pub mod topics;
pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use batches::configure_batch_routes;
pub use courses::configure_course_routes;
pub use portal::configure_portal_routes;
pub use progress::configure_progress_routes;
pub use staff::configure_staff_routes;
pub use students::configure_student_routes;
pub use topics::configure_topic_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 所有业务路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_portal_routes)
        .configure(configure_user_routes)
        .configure(configure_staff_routes)
        .configure(configure_course_routes)
        .configure(configure_topic_routes)
        .configure(configure_batch_routes)
        .configure(configure_student_routes)
        .configure(configure_progress_routes)
        .configure(configure_attendance_routes);
}
