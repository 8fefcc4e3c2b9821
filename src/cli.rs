//! Clap adapter for nestconf.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Override
//! tokens have open-ended names (`--server.http.port=...`) that clap cannot
//! know about, so [`OverrideArgs`] collects everything that follows a bare
//! `--` and hands it to [`parse_args`](crate::args::parse_args).
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Cli {
//!     #[arg(long)]
//!     config: Vec<PathBuf>,
//!
//!     #[command(flatten)]
//!     overrides: OverrideArgs,
//! }
//!
//! // myapp --config base.json -- --server.port=9090 --debug true
//! ```

use clap::Args;

use crate::args::parse_args;
use crate::config::Config;
use crate::error::Result;
use crate::overrides::{self, Override};

#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    /// Config overrides after `--`, e.g. `-- --server.port=9090 --debug true`.
    #[arg(last = true, value_name = "OVERRIDES")]
    pub overrides: Vec<String>,
}

impl OverrideArgs {
    /// Split the captured tokens into typed overrides.
    pub fn into_overrides(self) -> Result<Vec<Override>> {
        parse_args(self.overrides)
    }

    /// Parse the captured tokens and apply them to `config`, fail-fast.
    pub fn apply_to(self, config: &mut Config) -> Result<()> {
        let parsed = self.into_overrides()?;
        overrides::apply_overrides(config, &parsed)
    }
}
