use anyhow::Context as _;
use labcred_core::{action, client::CredPersistentClient, print_success};
use labcred_webclient::Url;

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Console sign-in URL; defaults to the stored console link
    #[arg()] // positional argument
    pub console_url: Option<String>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let cli = CredPersistentClient::new(global_args.site.into(), &cfg.cache_dir);

    let console_url = args
        .console_url
        .as_deref()
        .map(|u| Url::parse(u).with_context(|| format!("Failed to parse as URL '{}'", u)))
        .transpose()?;

    action::autofill(&cli, console_url, &cfg.watch).await?;
    print_success!("Sign-in form filled and submitted");
    Ok(())
}
