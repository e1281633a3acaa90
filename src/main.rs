use academy_signups::config::Config;
use academy_signups::engine::Engine;
use academy_signups::error::Error;
use academy_signups::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let engine = Engine::from_config(&config).await?;

    serve(engine, config.bind_addr).await
}
