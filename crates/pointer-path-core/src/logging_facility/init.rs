//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable output for development
    #[default]
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "pointer_path=debug",
            Profile::Production => "pointer_path=info",
            Profile::Test => "pointer_path=trace",
        }
    }
}

static ACTIVE_PROFILE: OnceLock<Profile> = OnceLock::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

/// Initialize the logging facility
///
/// The first call installs the subscriber for `profile`; later calls are
/// no-ops. A subscriber installed elsewhere beforehand is left in place.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Bare registry; use `init_test_capture()` to record events
///
/// # Example
///
/// ```
/// use pointer_path_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    ACTIVE_PROFILE.get_or_init(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(env_filter(profile))
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .try_init()
                .is_ok(),
            // Capture is installed separately via init_test_capture()
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if !installed {
            tracing::debug!(?profile, "global subscriber already set");
        }
        profile
    });
}

/// Profile of the first `init` call, if any
pub fn active_profile() -> Option<Profile> {
    ACTIVE_PROFILE.get().copied()
}
