pub mod analyses_response;
pub mod error_body;
pub mod job_status_response;
pub mod submit_job_request;
pub mod submit_job_response;
