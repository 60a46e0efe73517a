use anyhow::Context;
use catalog_app::App;
use catalog_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        port = settings.server.port,
        "catalog-app bootstrap starting"
    );

    let app = App::bootstrap(settings).await?;

    tracing::info!("catalog-app bootstrap complete");
    app.serve().await
}
