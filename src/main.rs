use anyhow::{anyhow, Context};
use swapi_host::{
    config::DotenvStatus, logging::init_logging, shutdown_signal, ApiClient, BackgroundRunner,
    Configuration, Host, RetryPolicy, Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = DotenvStatus::load();

    let config = Configuration::from_process();
    let settings = Settings::from_configuration(&config).map_err(|err| anyhow!(err))?;

    let log_guard = init_logging(&settings.log_file)
        .with_context(|| format!("failed to initialize logging to {}", settings.log_file.display()))?;

    tracing::info!("swapi-host starting");
    dotenv.log();
    settings.log_startup();

    let client = ApiClient::new(&settings.base_url)?.with_retry_policy(RetryPolicy::standard());
    let mut runner = BackgroundRunner::new(client, config, &settings.message_key, std::io::stdout())
        .with_endpoint(settings.endpoint)
        .with_mode(settings.response_mode);

    let result = Host::new().run(&mut runner, shutdown_signal()).await;
    if let Err(err) = &result {
        tracing::error!("host terminated: {err}");
    }

    drop(log_guard);
    result.context("background runner failed")
}
