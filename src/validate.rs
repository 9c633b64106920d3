pub mod checks;
pub mod report;
