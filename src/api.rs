use crate::envelope;
use crate::error::ApiError;
use crate::model::{NewReservation, Person, PersonId, PersonRef, PersonUpdate, Reservation, Role};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, trace};

/// Thin client over the SkillWheel REST API
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and return the body of a success response
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        trace!("{} {}", status, response.url());
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let message = envelope::error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
            return Err(ApiError::Status { status, message });
        }
        Ok(body)
    }

    pub async fn reservations_for_instructor(
        &self,
        instructor_id: PersonId,
    ) -> Result<Vec<Reservation>, ApiError> {
        let url = self.url(&format!("/api/reservations/instructor/{instructor_id}"));
        debug!("Fetching reservations from: {}", url);
        let body = self.send(self.http.get(url)).await?;
        envelope::reservations(&body)
    }

    pub async fn person(&self, who: PersonRef) -> Result<Person, ApiError> {
        let url = self.url(&format!("/api/{}/{}", who.role.collection(), who.id));
        debug!("Fetching person from: {}", url);
        let body = self.send(self.http.get(url)).await?;
        envelope::person(who.role, &body)
    }

    pub async fn instructor(&self, id: PersonId) -> Result<Person, ApiError> {
        self.person(PersonRef {
            role: Role::Instructor,
            id,
        })
        .await
    }

    pub async fn update_person(
        &self,
        who: PersonRef,
        update: &PersonUpdate,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/{}/{}", who.role.collection(), who.id));
        debug!("Updating person at: {}", url);
        self.send(self.http.put(url).json(update)).await?;
        Ok(())
    }

    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<(), ApiError> {
        let url = self.url("/api/reservations");
        debug!("Creating reservation: {:?}", reservation);
        let body = self.send(self.http.post(url).json(reservation)).await?;
        trace!("Created: {}", String::from_utf8_lossy(&body));
        Ok(())
    }
}
