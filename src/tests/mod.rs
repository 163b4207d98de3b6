// Test modules for stream-llm crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities
pub mod helpers;

pub mod model;

// NOTE: HTTP-facing orchestrator tests live in integration tests
// (tests/streaming_integration_tests.rs) because they need a wiremock server.
