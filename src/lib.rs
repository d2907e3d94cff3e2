pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{run_batch, MenuCommand, Session};
pub use config::{CliArgs, CreationMode, SeederConfig, ServiceTarget, TargetSelection};
pub use self::core::{FixtureGenerator, MySqlGateway, ServiceClient, ShellRunner, SinkDispatcher};
pub use domain::model::{DispatchReport, RegistrationRecord};
pub use utils::error::{Result, SeederError};
