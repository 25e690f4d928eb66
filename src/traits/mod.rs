pub mod review_backend;
