use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use netbridge::constants::config::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_DIRECTIVES};
use netbridge::{BridgeContext, ConfigManager, RequestComponent};

/// Usage: `netbridge [config-path] [url]`
#[tokio::main]
async fn main() -> Result<()> {
    let mut env_filter = EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        env_filter = env_filter.add_directive(directive.parse()?);
    }
    fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let url = args.next();

    let config_manager = ConfigManager::load_or_default(&config_path).await?;
    let config = config_manager.get_current_config();

    // [logging] covers startup; the component's own settings apply from attach on
    let context = BridgeContext::new(config.logging);
    let mut component = RequestComponent::new("cli", config.component.clone(), context.clone());

    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, String>>();
    let data_tx = tx.clone();
    component
        .events()
        .data_received
        .subscribe(move |body: &String| {
            let _ = data_tx.send(Ok(body.clone()));
        });
    component
        .events()
        .error_occurred
        .subscribe(move |message: &String| {
            let _ = tx.send(Err(message.clone()));
        });

    component.attach().await;
    component.activate().await;

    match &url {
        Some(url) => component.fetch_data(url).await,
        None => component.fetch_default_data().await,
    }

    let outcome = rx
        .try_recv()
        .map_err(|e| anyhow!("Request finished without a result: {}", e))?;

    component.detach();
    context.requests.shutdown().await;

    match outcome {
        Ok(body) => {
            info!("Request completed ({} bytes)", body.len());
            println!("{}", body);
            Ok(())
        }
        Err(message) => {
            error!("Request failed: {}", message);
            Err(anyhow!(message))
        }
    }
}
