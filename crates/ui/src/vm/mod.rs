mod assessment_vm;
mod assignment_vm;
mod outcome_vm;
mod time_fmt;

pub use assessment_vm::{
    MediaVm, NavVm, OptionVm, PromptVm, QuestionVm, SessionIntent, SessionScreenVm,
    map_session_screen, resolve_file_url,
};
pub use assignment_vm::{AssignmentCardVm, CatalogueVm, map_catalogue};
pub use outcome_vm::{OutcomeCardVm, ResultsVm, map_results};
pub use time_fmt::{format_date, format_datetime};
