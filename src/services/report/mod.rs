pub mod http;
pub mod render;

use async_trait::async_trait;

use crate::models::{BookingDetails, Equivalent, TransportEmission};

#[async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Distance in km between two cities.
    async fn fetch_distance(&self, from: &str, to: &str) -> anyhow::Result<f64>;

    /// Emissions of a flight over `km`.
    async fn fetch_emissions(&self, km: f64) -> anyhow::Result<Vec<TransportEmission>>;

    /// Emissions of the usual alternative modes over `km`.
    async fn fetch_comparison(&self, km: f64) -> anyhow::Result<Vec<TransportEmission>>;

    async fn fetch_equivalents(&self) -> anyhow::Result<Vec<Equivalent>>;
}

/// Fetches everything the confirmation needs and renders it.
pub async fn build_confirmation(
    fetcher: &dyn ReportFetcher,
    details: &BookingDetails,
) -> anyhow::Result<String> {
    let from = details.origin_city.as_deref().unwrap_or_default();
    let to = details.destination_city.as_deref().unwrap_or_default();

    let km = fetcher.fetch_distance(from, to).await?;
    tracing::debug!(from, to, km, "fetched trip distance");

    let (flight, comparison, equivalents) = tokio::try_join!(
        fetcher.fetch_emissions(km),
        fetcher.fetch_comparison(km),
        fetcher.fetch_equivalents(),
    )?;

    render::render_confirmation(details, &flight, &comparison, &equivalents)
}
