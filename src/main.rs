//! opsdeck CLI entry point.

use opsdeck_lib::cli::{self, Cli};
use opsdeck_lib::core::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli::execute(cli).await
}
