pub mod client_ip;
pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod time;
pub mod validate;

pub use client_ip::client_ip;
pub use extractor::{SafeBatchIdI64, SafeIDI64, SafeStudentIdI64};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::{contains_pattern, ends_with_pattern, escape_like_pattern};
