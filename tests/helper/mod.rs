#![allow(dead_code)]

pub mod registry;
pub mod server;

pub use registry::{MockRegistry, RecordingChangelogResolver, create_test_pipeline};
pub use server::{mock_changelog, mock_npm_package, mock_release, test_config};
