#[path = "../common/mod.rs"]
mod common;

mod get_tickets_tests;
