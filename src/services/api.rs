use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::models::{Booking, BookingConflict, BookingStatus, CampsiteCandidate, CampsiteSuggestion};

/// Seam over the booking backend so workflows can be exercised against a
/// test double.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ApiError>;

    /// Campsites free for the whole range. An empty list means "no
    /// availability" and is a success; failures carry any conflicts and
    /// suggestions the server reported.
    async fn available_campsites(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<CampsiteCandidate>, ApiError>;

    async fn approve(
        &self,
        booking_id: &str,
        campsite_id: &str,
        admin_notes: Option<&str>,
    ) -> Result<Booking, ApiError>;

    /// The backend may or may not echo the updated booking back.
    async fn reject(&self, booking_id: &str, admin_notes: &str)
        -> Result<Option<Booking>, ApiError>;

    async fn cancel(&self, booking_id: &str, admin_notes: &str)
        -> Result<Option<Booking>, ApiError>;
}

pub struct HttpBookingApi {
    base_url: String,
    admin_token: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct BookingListBody {
    bookings: Vec<Booking>,
}

#[derive(Deserialize)]
struct CampsiteListBody {
    campsites: Vec<CampsiteCandidate>,
}

#[derive(Deserialize)]
struct BookingBody {
    booking: Booking,
}

#[derive(Deserialize)]
struct OptionalBookingBody {
    #[serde(default)]
    booking: Option<Booking>,
}

/// Best-effort shape of a non-2xx response body.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    conflicts: Vec<BookingConflict>,
    #[serde(default)]
    suggestions: Vec<CampsiteSuggestion>,
}

impl HttpBookingApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            admin_token: config.admin_token.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-2xx response into an `ApiError::Api`, keeping whatever
    /// structure the body had. A body that is not JSON falls back to a
    /// generic message carrying the HTTP status.
    async fn error_from(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => ApiError::Api {
                status,
                code: body.code,
                message: body
                    .message
                    .unwrap_or_else(|| format!("request failed with HTTP {status}")),
                conflicts: body.conflicts,
                suggestions: body.suggestions,
            },
            Err(_) => ApiError::http_status(status),
        }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.admin_token)
            .query(query)
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::error_from(resp).await)
        }
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.admin_token)
            .json(&body)
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::error_from(resp).await)
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        let resp = self.get("/admin/bookings", &query).await?;
        let body: BookingListBody = resp.json().await?;
        tracing::debug!(count = body.bookings.len(), "fetched bookings");
        Ok(body.bookings)
    }

    async fn available_campsites(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<CampsiteCandidate>, ApiError> {
        let query = vec![
            ("startDate", start_date.to_string()),
            ("endDate", end_date.to_string()),
        ];
        let resp = self.get("/admin/campsites/available", &query).await?;
        let body: CampsiteListBody = resp.json().await?;
        Ok(body.campsites)
    }

    async fn approve(
        &self,
        booking_id: &str,
        campsite_id: &str,
        admin_notes: Option<&str>,
    ) -> Result<Booking, ApiError> {
        let mut body = json!({ "campsiteId": campsite_id });
        if let Some(notes) = admin_notes {
            body["adminNotes"] = json!(notes);
        }
        tracing::info!(booking_id, campsite_id, "approving booking");
        let resp = self
            .post(&format!("/admin/bookings/{booking_id}/approve"), body)
            .await?;
        let body: BookingBody = resp.json().await?;
        Ok(body.booking)
    }

    async fn reject(
        &self,
        booking_id: &str,
        admin_notes: &str,
    ) -> Result<Option<Booking>, ApiError> {
        tracing::info!(booking_id, "rejecting booking");
        let resp = self
            .post(
                &format!("/admin/bookings/{booking_id}/reject"),
                json!({ "adminNotes": admin_notes }),
            )
            .await?;
        let body: OptionalBookingBody = resp.json().await?;
        Ok(body.booking)
    }

    async fn cancel(
        &self,
        booking_id: &str,
        admin_notes: &str,
    ) -> Result<Option<Booking>, ApiError> {
        tracing::info!(booking_id, "cancelling booking");
        let resp = self
            .post(
                &format!("/admin/bookings/{booking_id}/cancel"),
                json!({ "adminNotes": admin_notes }),
            )
            .await?;
        let body: OptionalBookingBody = resp.json().await?;
        Ok(body.booking)
    }
}
