use labcred_core::{client::CredPersistentClient, print_warn};
use labcred_webclient::{CredField, CredFieldKind};

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Print secret fields in clear text
    #[arg(long)]
    pub reveal: bool,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let cli = CredPersistentClient::new(global_args.site.into(), &cfg.cache_dir);

    let Some(stored) = cli.load_fresh_record()? else {
        print_warn!("No stored credentials (never extracted, or expired and erased)");
        return Ok(());
    };

    for field in CredField::ALL {
        let value = stored.record.get(field);
        let shown = match field.kind() {
            CredFieldKind::Secret if !args.reveal => mask(value),
            _ => value.to_owned(),
        };
        println!("{:>14}: {}", field.name(), shown);
    }
    println!("{:>14}: {}", "extracted-at", stored.extracted_at);
    if let Some(saved_at) = stored.last_saved {
        println!("{:>14}: {}", "last-saved", saved_at);
    }
    Ok(())
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "*".repeat(value.len().min(12))
    }
}
