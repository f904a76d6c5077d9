use anyhow::Context;
use reqwest::Client;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;

pub fn build_rating_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .context("build rating HTTP client")
}
