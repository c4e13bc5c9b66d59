pub mod approval;
pub mod auth_client;

pub use approval::{ApprovalReport, DemoAccountApproval};
pub use auth_client::AuthApiClient;
pub use smoke_test::{SmokeReport, SmokeTest, SmokeTestOptions, StepOutcome};
