//! Integration tests for the payment lifecycle.

mod helpers;

mod config_test;
mod gateway_test;
mod hook_test;
mod payment_flow_test;
