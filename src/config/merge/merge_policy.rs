//! Merge rules: defaults applied before any file or environment source.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("store.root", ".lambda-hook/store")?
        .set_default("store.bucket", "lambda-artifacts")?
        .set_default("package.follow_symlinks", false)?
        .set_default("package.preserve_executable", false)
}
