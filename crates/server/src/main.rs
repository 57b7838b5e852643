#[tokio::main]
async fn main() -> anyhow::Result<()> {
    draftsmith_server::start().await
}
