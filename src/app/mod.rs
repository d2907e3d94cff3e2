// Entry points: the interactive menu and the one-shot batch run.

pub mod batch;
pub mod session;

pub use batch::{run_batch, BatchPlan};
pub use session::{MenuCommand, Session};
