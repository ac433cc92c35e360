mod batch_report;
mod expected_status;
mod redirect_record;
mod redirect_spec;
mod verification;

pub use batch_report::*;
pub use expected_status::*;
pub use redirect_record::*;
pub use redirect_spec::*;
pub use verification::*;
