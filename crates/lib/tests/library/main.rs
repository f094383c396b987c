mod build_session_tests;
mod resolution_tests;
