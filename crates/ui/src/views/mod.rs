mod assignments;
mod results;
mod session;
mod state;

pub use assignments::AssignmentsView;
pub use results::{ResultsList, ResultsView};
pub use session::SessionView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
