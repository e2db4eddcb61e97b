//! Remove downloaded archives that a Wabbajack modlist no longer references
//!
//! Usage:
//!   clean_wj_downloads <path/to/modlist.wabbajack>

use cli::CleanArgs;
use reconciler::{ModlistSources, ReconcileConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match cli::parse_args::<CleanArgs, _, _>(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };

    cli::init_logging(args.common.verbose);
    let config = cli::build_config(ReconcileConfig::single(), &args.common);

    cli::execute(config, args.common.verbose, |config| {
        ModlistSources::single(&args.modlist, config)
    })
}
