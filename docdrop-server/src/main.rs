use anyhow::Result;
use docdrop_server::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .init();

    let ax = docdrop_server::build(&settings).await?;

    let addr = settings.addr();
    tracing::info!(debug = settings.debug, remote = settings.storage.remote.is_some(), "starting docdrop");
    println!("[docdrop] listening on http://{addr}");

    ax.listen(addr).await?;

    Ok(())
}
