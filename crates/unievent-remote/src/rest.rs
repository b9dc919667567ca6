//! PostgREST client for the remote tables

use async_trait::async_trait;
use tracing::{debug, error};
use url::Url;

use crate::error::RemoteError;
use crate::rows::{BookingRow, NewBooking, NewUser, UserRow};
use crate::store::RecordStore;
use crate::Result;

/// HTTP-backed [`RecordStore`].
///
/// No request timeout is configured; a hung call is bounded only by the
/// transport.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RestStore {
    pub fn new(mut base_url: Url, api_key: impl Into<String>) -> Result<Self> {
        // `Url::join` drops the last path segment unless it ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("rest/v1/{table}"))?)
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn check_status(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!(status = %status, body = %body, "Failed to {}", what);
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RecordStore for RestStore {
    async fn find_user(&self, registration_number: &str) -> Result<Option<UserRow>> {
        let url = self.table_url("users")?;
        debug!(registration_number = %registration_number, "Looking up user");

        let response = self
            .get(url)
            .query(&[
                ("registration_number", format!("eq.{registration_number}")),
                ("select", "*".to_string()),
            ])
            .send()
            .await?;
        let response = check_status(response, "look up user").await?;

        let rows: Vec<UserRow> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRow> {
        let url = self.table_url("users")?;
        debug!(registration_number = %user.registration_number, "Inserting user");

        let response = self
            .post(url)
            .header("Prefer", "return=representation")
            .json(&[&user])
            .send()
            .await?;
        let response = check_status(response, "insert user").await?;

        let rows: Vec<UserRow> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or(RemoteError::EmptyResponse("users"))
    }

    async fn bookings_for_registration(
        &self,
        registration_number: &str,
    ) -> Result<Vec<BookingRow>> {
        let url = self.table_url("bookings")?;

        let response = self
            .get(url)
            .query(&[
                (
                    "registration_numbers",
                    format!("cs.{{{registration_number}}}"),
                ),
                ("order", "created_at.desc".to_string()),
                ("select", "*".to_string()),
            ])
            .send()
            .await?;
        let response = check_status(response, "load bookings").await?;

        let rows: Vec<BookingRow> = response.json().await?;
        debug!(
            registration_number = %registration_number,
            count = rows.len(),
            "Fetched bookings"
        );
        Ok(rows)
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<()> {
        let url = self.table_url("bookings")?;
        debug!(booking_id = %booking.id, "Inserting booking");

        let response = self
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&[&booking])
            .send()
            .await?;
        check_status(response, "insert booking").await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_keeps_base_path() {
        let store = RestStore::new(
            Url::parse("https://gateway.example.com/proxy").unwrap(),
            "key",
        )
        .unwrap();
        assert_eq!(
            store.table_url("users").unwrap().as_str(),
            "https://gateway.example.com/proxy/rest/v1/users"
        );

        let store = RestStore::new(Url::parse("https://abc.supabase.co").unwrap(), "key").unwrap();
        assert_eq!(
            store.table_url("bookings").unwrap().as_str(),
            "https://abc.supabase.co/rest/v1/bookings"
        );
    }
}
