use flexi_logger::Logger;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG overrides the default level.
    let _logger = Logger::try_with_env_or_str("info")?.log_to_stderr().start()?;

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    log::info!("event=server_start module=mock_server status=ok addr={addr}");
    mock_server::run(listener).await?;
    Ok(())
}
