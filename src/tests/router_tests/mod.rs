mod auth_flow_tests;
mod dashboard_tests;
mod intake_tests;
