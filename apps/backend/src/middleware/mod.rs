pub mod cors;
pub mod jwt_extract;
pub mod request_trace;
pub mod structured_logger;
