//! Request dispatch boundary for the planets resource.
//!
//! # Responsibility
//! - Route an `(method, action)` pair to the matching resolver operation.
//! - Validate loose request params into typed params before resolution.
//! - Map resolver outcomes to status categories and response bodies.
//!
//! # Invariants
//! - Read actions are served on `GET` only, write actions on `POST` only.
//! - Unknown actions answer `NotAllowed`, distinct from `NotFound`.
//! - Infrastructure failures answer `Internal` and never leak as `NotFound`.

use crate::enrichment::EnrichmentClient;
use crate::model::planet::{CreateParams, DeleteParams, RequestParams, UpdateParams, ViewParams};
use crate::repo::planet_repo::PlanetStore;
use crate::service::planet_service::{Listing, Outcome, PlanetService, ServiceResult};
use log::error;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Transport method of an incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Parses `get`/`post` case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            _ => None,
        }
    }
}

/// Resource actions understood by the planets endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    View,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Resolves an action token for `method`; `None` means not allowed.
    pub fn for_method(method: Method, token: &str) -> Option<Self> {
        match (method, token) {
            (Method::Get, "list") => Some(Self::List),
            (Method::Get, "view") => Some(Self::View),
            (Method::Post, "create") => Some(Self::Create),
            (Method::Post, "update") => Some(Self::Update),
            (Method::Post, "delete") => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Observable outcome category of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    NotAllowed,
    Internal,
}

impl Status {
    /// HTTP-equivalent status code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::NotAllowed => 405,
            Self::Internal => 500,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Ok
    }
}

/// Response body: structured JSON for records, plain text for messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: Status,
    pub body: Body,
}

impl ApiResponse {
    fn text(status: Status, text: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Text(text.into()),
        }
    }

    fn json(value: &impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self {
                status: Status::Ok,
                body: Body::Json(value),
            },
            Err(err) => {
                error!("event=api_dispatch module=api status=error error_code=serialize_failed error={err}");
                Self::text(Status::Internal, "Internal error")
            }
        }
    }
}

/// Dispatches one request against `service`.
pub fn dispatch<S: PlanetStore, E: EnrichmentClient>(
    service: &PlanetService<S, E>,
    method: Method,
    action: &str,
    params: &RequestParams,
) -> ApiResponse {
    let Some(resolved) = Action::for_method(method, action) else {
        return ApiResponse::text(Status::NotAllowed, format!("Action {action} not allowed"));
    };

    let result = match resolved {
        Action::List => service.list().map(list_response),
        Action::View => service
            .view(&ViewParams::from_request(params))
            .map(|outcome| record_response(outcome, "Planet not found".to_string())),
        Action::Create => service
            .create(&CreateParams::from_request(params))
            .map(|outcome| record_response(outcome, "Planet not found".to_string())),
        Action::Update => {
            let typed = UpdateParams::from_request(params);
            let missing = not_found_message(typed.name.as_deref());
            service
                .update(&typed)
                .map(|outcome| record_response(outcome, missing))
        }
        Action::Delete => {
            let typed = DeleteParams::from_request(params);
            let missing = not_found_message(typed.name.as_deref());
            service.delete(&typed).map(|outcome| match outcome {
                Outcome::Success(message) => ApiResponse::text(Status::Ok, message),
                Outcome::NotFound => ApiResponse::text(Status::NotFound, missing),
                Outcome::Invalid(err) => ApiResponse::text(Status::BadRequest, err.to_string()),
            })
        }
    };

    internal_on_error(action, result)
}

fn list_response(listing: Listing) -> ApiResponse {
    match listing {
        Listing::Planets(planets) => ApiResponse::json(&planets),
        Listing::Empty => ApiResponse::text(Status::Ok, "No Planets Stored"),
    }
}

fn record_response<T: Serialize>(outcome: Outcome<T>, missing: String) -> ApiResponse {
    match outcome {
        Outcome::Success(record) => ApiResponse::json(&record),
        Outcome::NotFound => ApiResponse::text(Status::NotFound, missing),
        Outcome::Invalid(err) => ApiResponse::text(Status::BadRequest, err.to_string()),
    }
}

fn not_found_message(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Planet {name} not found"),
        None => "Planet not found".to_string(),
    }
}

fn internal_on_error(action: &str, result: ServiceResult<ApiResponse>) -> ApiResponse {
    result.unwrap_or_else(|err| {
        error!(
            "event=api_dispatch module=api status=error action={} error={}",
            action, err
        );
        ApiResponse::text(Status::Internal, format!("Internal error: {err}"))
    })
}
