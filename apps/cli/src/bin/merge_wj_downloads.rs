//! Remove downloaded archives that neither of two Wabbajack modlists references
//!
//! Usage:
//!   merge_wj_downloads <first.wabbajack> <second.wabbajack>

use cli::MergeArgs;
use reconciler::{ModlistSources, ReconcileConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match cli::parse_args::<MergeArgs, _, _>(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };

    cli::init_logging(args.common.verbose);
    let config = cli::build_config(ReconcileConfig::merged(), &args.common);

    cli::execute(config, args.common.verbose, |config| {
        ModlistSources::merge(&args.first, &args.second, config)
    })
}
