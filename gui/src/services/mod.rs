pub mod dashboard_client;
pub mod fetch;
