#[tokio::main]
async fn main() -> anyhow::Result<()> {
    xapi_lrs::server::run().await
}
