pub mod api_client;
pub mod dispatcher;
pub mod explicit;
pub mod generator;
pub mod password;
pub mod reset;
pub mod status;
pub mod store;

pub use api_client::ServiceClient;
pub use dispatcher::SinkDispatcher;
pub use generator::FixtureGenerator;
pub use reset::{reset_all, ResetOutcome, ShellRunner};
pub use status::{render_status, status_overview, StatusRow};
pub use store::MySqlGateway;
