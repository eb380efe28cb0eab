//! Google Distance Matrix client.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::DistanceProvider;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<MatrixDistance>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixDistance {
    /// Meters.
    value: u64,
}

/// Driving distance from the Google Distance Matrix API.
#[derive(Clone, Debug)]
pub struct GoogleDistanceMatrix {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
}

impl GoogleDistanceMatrix {
    /// Creates a client.
    ///
    /// `api_base` is a host such as `maps.googleapis.com`, or a full
    /// `scheme://host` prefix. A missing key is reported on first use rather
    /// than here, so the service can still start and serve static content.
    pub fn new(api_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: api_base.into(),
        }
    }

    fn url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        if base.contains("://") {
            format!("{}/maps/api/distancematrix/json", base)
        } else {
            format!("https://{}/maps/api/distancematrix/json", base)
        }
    }
}

#[async_trait]
impl DistanceProvider for GoogleDistanceMatrix {
    #[tracing::instrument(skip(self))]
    async fn distance_km(&self, origin: &str, destination: &str) -> EngineResult<Decimal> {
        let key = self.api_key.as_deref().ok_or(EngineError::MissingApiKey)?;

        let res = self
            .client
            .get(self.url())
            .query(&[("origins", origin), ("destinations", destination), ("key", key)])
            .send()
            .await
            .map_err(|e| EngineError::DistanceProvider {
                message: e.without_url().to_string(),
            })?;

        let status = res.status();
        if status.is_client_error() {
            warn!(status = status.as_u16(), "Distance provider rejected the request");
            return Err(EngineError::DistanceUnavailable {
                message: format!("provider returned HTTP {}", status.as_u16()),
            });
        } else if !status.is_success() {
            return Err(EngineError::DistanceProvider {
                message: format!("provider returned HTTP {}", status.as_u16()),
            });
        }

        let data: MatrixResponse = res.json().await.map_err(|e| EngineError::DistanceProvider {
            message: e.without_url().to_string(),
        })?;

        let km = distance_from_response(data)?;
        debug!(distance_km = %km, "Distance resolved");
        Ok(km)
    }
}

/// Extracts the first element's distance in kilometers.
fn distance_from_response(data: MatrixResponse) -> EngineResult<Decimal> {
    if data.status != "OK" {
        let message = match data.error_message {
            Some(detail) => format!("{}: {}", data.status, detail),
            None => data.status,
        };
        return Err(EngineError::DistanceProvider { message });
    }

    let element = data
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| EngineError::DistanceUnavailable {
            message: "no route returned".to_string(),
        })?;

    if element.status != "OK" {
        return Err(EngineError::DistanceUnavailable {
            message: element.status,
        });
    }

    let meters = element
        .distance
        .ok_or_else(|| EngineError::DistanceUnavailable {
            message: "route has no distance".to_string(),
        })?
        .value;

    Ok(Decimal::from(meters) / Decimal::ONE_THOUSAND)
}
