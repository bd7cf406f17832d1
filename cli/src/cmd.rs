pub mod clear;
pub mod configure;
pub mod edit;
pub mod extract;
pub mod fill;
pub mod show;
pub mod watch;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "poridhi")]
    pub site: ArgSite,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Clear(clear::Args),
    Configure(configure::Args),
    Edit(edit::Args),
    Extract(extract::Args),

    #[command(alias("f"))]
    Fill(fill::Args),

    Show(show::Args),

    #[command(alias("w"))]
    Watch(watch::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Clear(args) => clear::exec(args, self),
            Configure(args) => configure::exec(args, self),
            Edit(args) => edit::exec(args, self),
            Extract(args) => extract::exec(args, self).await,
            Fill(args) => fill::exec(args, self).await,
            Show(args) => show::exec(args, self),
            Watch(args) => watch::exec(args, self).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgSite {
    Poridhi,
}

impl From<ArgSite> for labcred_webclient::LabSite {
    fn from(value: ArgSite) -> Self {
        use labcred_webclient::LabSite;
        use ArgSite::*;
        match value {
            Poridhi => LabSite::Poridhi,
        }
    }
}

impl From<&ArgSite> for labcred_webclient::LabSite {
    fn from(&value: &ArgSite) -> Self {
        value.into()
    }
}
