//! Booking requests, and a client that sends them

use crate::api::auth::AuthService;
use crate::api::client::{ApiClient, TimedResponse};
use crate::api::endpoints;
use crate::api::payloads::Booking;
use crate::api::request::{ApiRequest, Credentials, HeaderSet};
use crate::config::ApiOptions;
use crate::result::VitrinaResult;

/// Builders for every booking call. Nothing here touches the network.
#[derive(Debug, Clone, Default)]
pub struct BookingService {
    credentials: Credentials,
}

impl BookingService {
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `GET /booking`, sent without headers
    #[must_use]
    pub fn get_all(&self) -> ApiRequest {
        ApiRequest::get(endpoints::BOOKING)
    }

    #[must_use]
    pub fn get_by_id(&self, id: u64) -> ApiRequest {
        ApiRequest::get(endpoints::booking(id)).headers(&HeaderSet::Accept)
    }

    #[must_use]
    pub fn get_by_name(&self, firstname: &str, lastname: &str) -> ApiRequest {
        ApiRequest::get(endpoints::BOOKING)
            .headers(&HeaderSet::Accept)
            .query("firstname", firstname)
            .query("lastname", lastname)
    }

    #[must_use]
    pub fn get_by_dates(&self, checkin: &str, checkout: &str) -> ApiRequest {
        ApiRequest::get(endpoints::BOOKING)
            .headers(&HeaderSet::Accept)
            .query("checkin", checkin)
            .query("checkout", checkout)
    }

    pub fn create(&self, booking: &Booking) -> VitrinaResult<ApiRequest> {
        ApiRequest::post(endpoints::BOOKING)
            .headers(&HeaderSet::Common)
            .json(booking)
    }

    pub fn update_with_basic_auth(&self, id: u64, booking: &Booking) -> VitrinaResult<ApiRequest> {
        ApiRequest::put(endpoints::booking(id))
            .headers(&HeaderSet::Common)
            .headers(&HeaderSet::BasicAuth(self.credentials.clone()))
            .json(booking)
    }

    pub fn update_with_token(
        &self,
        id: u64,
        booking: &Booking,
        token: &str,
    ) -> VitrinaResult<ApiRequest> {
        ApiRequest::put(endpoints::booking(id))
            .headers(&HeaderSet::Common)
            .headers(&HeaderSet::CookieToken(token.to_string()))
            .json(booking)
    }

    #[must_use]
    pub fn delete_with_basic_auth(&self, id: u64) -> ApiRequest {
        ApiRequest::delete(endpoints::booking(id))
            .headers(&HeaderSet::BasicAuth(self.credentials.clone()))
    }

    #[must_use]
    pub fn delete_with_token(&self, id: u64, token: &str) -> ApiRequest {
        ApiRequest::delete(endpoints::booking(id))
            .headers(&HeaderSet::CookieToken(token.to_string()))
    }
}

/// [`BookingService`] requests sent through an [`ApiClient`].
///
/// The token variants first fetch a fresh token from `/auth`; the returned
/// duration covers only the booking call itself.
#[derive(Debug, Clone)]
pub struct BookingClient {
    client: ApiClient,
    service: BookingService,
}

impl BookingClient {
    pub fn new(options: &ApiOptions) -> VitrinaResult<Self> {
        Ok(Self::from_parts(
            ApiClient::new(options)?,
            Credentials::from(options),
        ))
    }

    #[must_use]
    pub const fn from_parts(client: ApiClient, credentials: Credentials) -> Self {
        Self {
            client,
            service: BookingService::new(credentials),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn service(&self) -> &BookingService {
        &self.service
    }

    pub async fn health_check(&self) -> VitrinaResult<()> {
        self.client.health_check().await
    }

    pub async fn fetch_token(&self) -> VitrinaResult<String> {
        AuthService::fetch_token(&self.client, self.service.credentials()).await
    }

    pub async fn get_all(&self) -> VitrinaResult<TimedResponse> {
        self.client.send(&self.service.get_all()).await
    }

    pub async fn get_by_id(&self, id: u64) -> VitrinaResult<TimedResponse> {
        self.client.send(&self.service.get_by_id(id)).await
    }

    pub async fn get_by_name(&self, firstname: &str, lastname: &str) -> VitrinaResult<TimedResponse> {
        self.client
            .send(&self.service.get_by_name(firstname, lastname))
            .await
    }

    pub async fn get_by_dates(&self, checkin: &str, checkout: &str) -> VitrinaResult<TimedResponse> {
        self.client
            .send(&self.service.get_by_dates(checkin, checkout))
            .await
    }

    pub async fn create(&self, booking: &Booking) -> VitrinaResult<TimedResponse> {
        self.client.send(&self.service.create(booking)?).await
    }

    pub async fn update_with_basic_auth(
        &self,
        id: u64,
        booking: &Booking,
    ) -> VitrinaResult<TimedResponse> {
        self.client
            .send(&self.service.update_with_basic_auth(id, booking)?)
            .await
    }

    pub async fn update_with_token(&self, id: u64, booking: &Booking) -> VitrinaResult<TimedResponse> {
        let token = self.fetch_token().await?;
        self.client
            .send(&self.service.update_with_token(id, booking, &token)?)
            .await
    }

    pub async fn delete_with_basic_auth(&self, id: u64) -> VitrinaResult<TimedResponse> {
        self.client
            .send(&self.service.delete_with_basic_auth(id))
            .await
    }

    pub async fn delete_with_token(&self, id: u64) -> VitrinaResult<TimedResponse> {
        let token = self.fetch_token().await?;
        self.client
            .send(&self.service.delete_with_token(id, &token))
            .await
    }
}
