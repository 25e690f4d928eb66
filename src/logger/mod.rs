pub mod animated_logger;
pub mod report_printer;
