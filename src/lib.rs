pub mod configuration;
pub mod domain;
pub mod generator;
pub mod output;
pub mod redirect_checker;
pub mod report;
pub mod spec_file;

pub use configuration::*;
pub use domain::*;
pub use redirect_checker::*;
pub use report::{FailedReportFormat, ReportError, ReportWriter, WrittenReports};
pub use spec_file::{SpecFileError, load_spec_file, parse_spec_file, resolve_url};
