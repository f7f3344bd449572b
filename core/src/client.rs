//! Stateless HTTP request builder and response parser for the ordering API.
//!
//! # Design
//! `OrderingClient` holds only a base URL and the cafe id the host resolved
//! for this session; it carries no mutable state between calls. Each
//! operation is split into a `build_*` method that produces an
//! [`HttpRequest`] and a `parse_*` method that consumes an [`HttpResponse`],
//! with a combined method that drives an [`HttpTransport`] through the
//! round-trip. Every failure is an [`ApiError`] value — this layer never
//! panics and never retries.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::types::{AddOrderItemRequest, MenuItem, SaveCommentRequest, StartOrderRequest, Table};

/// Stateless client for the table-ordering API.
///
/// The cafe id scopes the table and menu listings and travels inside each
/// line-item write; it is an opaque tenant input resolved by the host.
#[derive(Debug, Clone)]
pub struct OrderingClient {
    base_url: String,
    cafe_id: i64,
}

impl OrderingClient {
    pub fn new(base_url: &str, cafe_id: i64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cafe_id,
        }
    }

    pub fn cafe_id(&self) -> i64 {
        self.cafe_id
    }

    pub fn build_list_tables(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/tables/{}", self.base_url, self.cafe_id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_menu(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/menu/{}", self.base_url, self.cafe_id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_start_order(&self, input: &StartOrderRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/order/start", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_add_item(&self, input: &AddOrderItemRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/order/add-item", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_save_comment(&self, input: &SaveCommentRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/order/comment", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn parse_list_tables(&self, response: HttpResponse) -> Result<Vec<Table>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_list_menu(&self, response: HttpResponse) -> Result<Vec<MenuItem>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    /// The ticket id arrives as a bare JSON number.
    pub fn parse_start_order(&self, response: HttpResponse) -> Result<i64, ApiError> {
        check_status(&response, 201)?;
        from_json(&response.body)
    }

    /// Acknowledgement only; any response body is ignored.
    pub fn parse_add_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    /// Acknowledgement only; any response body is ignored.
    pub fn parse_save_comment(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn list_tables<T: HttpTransport>(&self, transport: &mut T) -> Result<Vec<Table>, ApiError> {
        let response = self.round_trip(transport, self.build_list_tables())?;
        self.parse_list_tables(response)
    }

    pub fn list_menu<T: HttpTransport>(&self, transport: &mut T) -> Result<Vec<MenuItem>, ApiError> {
        let response = self.round_trip(transport, self.build_list_menu())?;
        self.parse_list_menu(response)
    }

    pub fn start_order<T: HttpTransport>(
        &self,
        transport: &mut T,
        input: &StartOrderRequest,
    ) -> Result<i64, ApiError> {
        let request = self.build_start_order(input)?;
        let response = self.round_trip(transport, request)?;
        self.parse_start_order(response)
    }

    pub fn add_item<T: HttpTransport>(
        &self,
        transport: &mut T,
        input: &AddOrderItemRequest,
    ) -> Result<(), ApiError> {
        let request = self.build_add_item(input)?;
        let response = self.round_trip(transport, request)?;
        self.parse_add_item(response)
    }

    pub fn save_comment<T: HttpTransport>(
        &self,
        transport: &mut T,
        input: &SaveCommentRequest,
    ) -> Result<(), ApiError> {
        let request = self.build_save_comment(input)?;
        let response = self.round_trip(transport, request)?;
        self.parse_save_comment(response)
    }

    fn round_trip<T: HttpTransport>(
        &self,
        transport: &mut T,
        request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        debug!(method = ?request.method, path = %request.path, "sending request");
        transport.send(request)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: serde::Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-expected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
