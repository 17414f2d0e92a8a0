pub mod applications;
pub mod dashboard;
pub mod jobs;
pub mod probes;
pub mod ui;
pub mod users;
pub mod utils;
