use anyhow::bail;
use labcred_core::{action, client::CredPersistentClient};

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

/// Print the `aws configure set ...` one-liner for the stored keys.
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub output: Option<String>,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let cli = CredPersistentClient::new(global_args.site.into(), &cfg.cache_dir);

    let mut console_cfg = cfg.console.clone();
    if let Some(region) = &args.region {
        console_cfg.region = region.clone();
    }
    if let Some(output) = &args.output {
        console_cfg.output = output.clone();
    }

    let Some(stored) = cli.load_fresh_record()? else {
        bail!("No usable credentials in store (missing or expired)");
    };

    let cmd = action::configure_command(&stored.record, &console_cfg)?;
    println!("{}", cmd);
    Ok(())
}
