use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "template-harvester")]
#[command(about = "Bulk-download template repositories and sort them by scanner validation")]
pub struct CliArgs {
    #[arg(
        short,
        long,
        default_value = "nuclei.txt",
        help = "Filename to read the repositories from"
    )]
    pub file: String,
}
