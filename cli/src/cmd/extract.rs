use labcred_core::{action, client::CredPersistentClient, print_success, print_warn};

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub page_url: String,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let (cli, url) = CredPersistentClient::new_with_parse_url(&args.page_url, &cfg.cache_dir)?;

    match action::extract_once(&cli, &url).await? {
        Some(record) => {
            print_success!("Credentials extracted for '{}'", record.username);
            println!("Saved to {}", cli.store().filepath().to_string_lossy());
        }
        None => {
            print_warn!(
                "No credentials found on the page (try `labcred watch` while the lab boots)"
            );
        }
    }
    Ok(())
}
