#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = fragment_consensus_lib::cli::parse_cli();
    fragment_consensus_lib::run(args).await
}
