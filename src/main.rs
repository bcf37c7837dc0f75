#[tokio::main]
async fn main() -> anyhow::Result<()> {
    insurance_insight::run().await
}
