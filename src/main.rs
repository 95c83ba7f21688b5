use std::sync::Arc;

use log::info;

use copygen::config::ProxyConfig;
use copygen::pipeline::Pipeline;
use copygen::providers::AnthropicClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>>
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = ProxyConfig::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let route_path = config.server.route_path.clone();

    let client = AnthropicClient::new(&config.generation);
    let pipeline = Arc::new(Pipeline::new(config, client));
    let app = copygen::server::router(pipeline, &route_path);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("copygen listening on {}", addr);

    axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

    info!("copygen shut down");
    Ok(())
}

async fn shutdown_signal()
{   if tokio::signal::ctrl_c().await.is_err()
    {   // No signal handler: run until killed
        std::future::pending::<()>().await;
    }
}
