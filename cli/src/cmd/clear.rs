use labcred_core::{action, client::CredPersistentClient, interactive, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let cli = CredPersistentClient::new(global_args.site.into(), &cfg.cache_dir);

    if !args.yes && !interactive::util::confirm("Clear all stored credentials?")? {
        return Ok(());
    }

    action::clear(&cli)?;
    print_success!("Stored credentials cleared");
    Ok(())
}
