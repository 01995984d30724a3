//! Token issuance through `POST /auth`

use crate::api::client::ApiClient;
use crate::api::endpoints;
use crate::api::request::{ApiRequest, Credentials, HeaderSet};
use crate::result::{VitrinaError, VitrinaResult};

/// Builds and runs the `/auth` call
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthService;

impl AuthService {
    /// `POST /auth` with the credentials as a JSON body
    pub fn create_token(credentials: &Credentials) -> VitrinaResult<ApiRequest> {
        ApiRequest::post(endpoints::AUTH)
            .headers(&HeaderSet::ContentType)
            .json(credentials)
    }

    /// Send [`create_token`](Self::create_token) and pull `token` out of the body.
    ///
    /// The API answers bad credentials with 200 and a `reason`; that is an
    /// [`VitrinaError::Api`] carrying the raw body.
    pub async fn fetch_token(client: &ApiClient, credentials: &Credentials) -> VitrinaResult<String> {
        let response = client.send(&Self::create_token(credentials)?).await?;
        response.expect_status(200)?;
        response
            .body
            .get("token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| VitrinaError::Api {
                status: response.status,
                body: response.text.clone(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::request::Method;

    #[test]
    fn test_create_token_request() {
        let request = AuthService::create_token(&Credentials::default()).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/auth");
        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(request.header_value("accept"), None);
        assert_eq!(request.body.unwrap()["username"], "admin");
    }
}
