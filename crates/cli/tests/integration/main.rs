mod common;
mod env_tests;
mod resolve_tests;
