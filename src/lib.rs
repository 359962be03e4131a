pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod report;
pub mod server;
#[doc(hidden)]
pub mod test_support;
