use async_trait::async_trait;

use crate::{
    api::DispatchService,
    entities::{TripAssignment, TripRequest},
    error::{upstream_error, Error},
};

/// Trip service reachable over HTTP at `POST {api_url}/trip/request`.
#[derive(Clone, Debug)]
pub struct HttpDispatch {
    client: reqwest::Client,
    api_url: String,
}

impl HttpDispatch {
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').into(),
        }
    }
}

#[async_trait]
impl DispatchService for HttpDispatch {
    #[tracing::instrument(skip(self))]
    async fn request_trip(&self, request: TripRequest) -> Result<TripAssignment, Error> {
        let url = format!("{}/trip/request", self.api_url);

        let res = self.client.post(url).json(&request).send().await?;

        // any non-success status is a failed assignment; the body is not read
        if !res.status().is_success() {
            tracing::warn!("dispatch responded with status {}", res.status());
            return Err(upstream_error());
        }

        let assignment: TripAssignment = res.json().await?;

        tracing::info!(
            driver_id = %assignment.driver_id,
            trace_id = ?assignment.trace_id,
            "driver assigned"
        );

        Ok(assignment)
    }
}
