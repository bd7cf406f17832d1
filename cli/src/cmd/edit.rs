use labcred_core::{action, client::CredPersistentClient, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let cli = CredPersistentClient::new(global_args.site.into(), &cfg.cache_dir);

    action::edit(&cli)?;
    print_success!(
        "Credentials saved to {}",
        cli.store().filepath().to_string_lossy()
    );
    Ok(())
}
