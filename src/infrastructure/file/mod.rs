pub mod report_log;
