use anyhow::Context;
use restaurant::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("restaurant".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber).context("Failed to set tracing subscriber")?;

    let settings = Settings::get().context("Failed to read configuration")?;

    let application = Application::new(settings).await?;
    application.server.await?;
    Ok(())
}
