pub mod language_model;
pub mod polarity_model;
pub mod report_repository;
