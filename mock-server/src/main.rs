use env_logger::Env;
use log::error;
use mock_server::Config;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().inspect_err(|e| error!("{e}"))?;
    let listener = TcpListener::bind(config.addr()).await?;
    mock_server::run_with_document(listener, config.document).await?;
    Ok(())
}
