//! Environment source: LAMBDA_HOOK__SECTION__KEY variables

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "LAMBDA_HOOK";

/// Add environment overrides, e.g. `LAMBDA_HOOK__PACKAGE__FUNCTION_NAME=things`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
}
