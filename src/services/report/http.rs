use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::ReportFetcher;
use crate::models::{Equivalent, TransportEmission};

/// Reads distances from distance24, emissions from monimpacttransport and
/// equivalents from the monconvertisseurco2 data file.
pub struct HttpReportFetcher {
    distance_url: String,
    emissions_url: String,
    equivalents_url: String,
    client: reqwest::Client,
}

impl HttpReportFetcher {
    pub fn new(distance_url: String, emissions_url: String, equivalents_url: String) -> Self {
        Self {
            distance_url,
            emissions_url,
            equivalents_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("failed to call {url}"))?
            .error_for_status()
            .with_context(|| format!("{url} returned error"))?
            .json()
            .await
            .with_context(|| format!("failed to parse response from {url}"))
    }

    async fn emissions(
        &self,
        query: &[(&str, String)],
    ) -> anyhow::Result<Vec<TransportEmission>> {
        let url = format!(
            "{}/getEmissionsPerDistance",
            self.emissions_url.trim_end_matches('/')
        );
        let modes: Vec<ApiEmission> = self.get_json(&url, query).await?;
        Ok(modes.into_iter().map(TransportEmission::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct ApiDistance {
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct ApiEmission {
    name: String,
    emissions: ApiKgCo2e,
    emoji: Option<ApiEmoji>,
}

#[derive(Debug, Deserialize)]
struct ApiKgCo2e {
    kgco2e: f64,
}

#[derive(Debug, Deserialize)]
struct ApiEmoji {
    main: String,
}

impl From<ApiEmission> for TransportEmission {
    fn from(api: ApiEmission) -> Self {
        Self {
            name: api.name,
            emoji: api.emoji.map(|e| e.main),
            kgco2e: api.emissions.kgco2e,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiEquivalent {
    #[serde(default)]
    emoji: String,
    #[serde(default)]
    total: f64,
    name: ApiLabel,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
    fr: Option<String>,
    en: Option<String>,
}

impl From<ApiEquivalent> for Equivalent {
    fn from(api: ApiEquivalent) -> Self {
        Self {
            emoji: api.emoji,
            label: api.name.fr.or(api.name.en).unwrap_or_default(),
            unit_kgco2e: api.total,
        }
    }
}

#[async_trait]
impl ReportFetcher for HttpReportFetcher {
    async fn fetch_distance(&self, from: &str, to: &str) -> anyhow::Result<f64> {
        let url = format!("{}/route.json", self.distance_url.trim_end_matches('/'));
        let route: ApiDistance = self
            .get_json(&url, &[("stops", format!("{from}|{to}"))])
            .await?;
        Ok(route.distance)
    }

    async fn fetch_emissions(&self, km: f64) -> anyhow::Result<Vec<TransportEmission>> {
        self.emissions(&[("transportations", "1".to_string()), ("km", km.to_string())])
            .await
    }

    async fn fetch_comparison(&self, km: f64) -> anyhow::Result<Vec<TransportEmission>> {
        self.emissions(&[
            ("filter", "smart".to_string()),
            ("fields", "emoji".to_string()),
            ("km", km.to_string()),
        ])
        .await
    }

    async fn fetch_equivalents(&self) -> anyhow::Result<Vec<Equivalent>> {
        let items: Vec<ApiEquivalent> = self.get_json(&self.equivalents_url, &[]).await?;
        Ok(items.into_iter().map(Equivalent::from).collect())
    }
}
