pub mod report_source;
pub use report_source::ReportDataSource;
pub mod report_repo;
pub use report_repo::ReportRepository;
