//! Integration test for logging initialization
//!
//! Lives in its own test binary so installing the global subscriber
//! cannot collide with other tests.

use std::fs;

use news_client::logging::{self, LOG_FILE};

#[test]
fn test_init_logging_writes_to_file() {
    let dir = std::env::temp_dir().join(format!("news-client-log-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let guard = logging::init_logging(&dir).unwrap();
    tracing::info!("endpoint resolution complete");

    // A second install attempt fails instead of panicking
    assert!(logging::init_logging(&dir).is_err());

    // Dropping the guard flushes the non-blocking file writer
    drop(guard);

    let contents = fs::read_to_string(dir.join(LOG_FILE)).unwrap();
    assert!(contents.contains("endpoint resolution complete"));

    fs::remove_dir_all(&dir).unwrap();
}
