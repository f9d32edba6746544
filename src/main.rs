#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = cartable_rust::run().await {
        eprintln!("cartable-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
