//! Request extractors that report malformed input as [`ApiError`].
//!
//! Axum's stock `Json`, `Query` and `Path` rejections answer with plain
//! text; these wrappers keep every error response in the JSON envelope.
//! Body and query values that parse but do not fit their field (a bad date,
//! an unknown enum code) come back as a validation error naming that field.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Path reported by `serde_path_to_error` when the failure is not inside a
/// named field.
const ROOT_PATH: &str = ".";

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ApiError::InvalidRequest(
                "expected request with `Content-Type: application/json`".into(),
            ));
        }
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
        from_json_slice(&body).map(Self)
    }
}

/// Deserializes a JSON body, naming the offending field on data errors.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when a field holds a value of the wrong
/// shape and [`ApiError::InvalidRequest`] for syntax errors, missing fields
/// or trailing input.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let field = err.path().to_string();
        let inner = err.into_inner();
        if inner.is_data() && field != ROOT_PATH {
            ApiError::validation(field, inner.to_string())
        } else {
            ApiError::InvalidRequest(inner.to_string())
        }
    })?;
    de.end()
        .map_err(|err| ApiError::InvalidRequest(err.to_string()))?;
    Ok(value)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
}

/// URL query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        from_query_str(parts.uri.query().unwrap_or_default()).map(Self)
    }
}

/// Deserializes a query string, naming the offending parameter.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a parameter that does not parse and
/// [`ApiError::InvalidRequest`] otherwise.
pub fn from_query_str<T: DeserializeOwned>(query: &str) -> Result<T, ApiError> {
    let de = serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));
    serde_path_to_error::deserialize(de).map_err(|err| {
        let field = err.path().to_string();
        let message = err.into_inner().to_string();
        if field == ROOT_PATH {
            ApiError::InvalidRequest(message)
        } else {
            ApiError::validation(field, message)
        }
    })
}

/// Path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::http::HeaderValue;
    use chrono::NaiveDate;
    use serde::Deserialize;

    use super::*;
    use crate::domain::ActivityType;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        birth_date: Option<NaiveDate>,
        #[serde(default)]
        activity_type: Option<ActivityType>,
    }

    #[derive(Debug, Deserialize)]
    struct Range {
        #[serde(default)]
        from: Option<NaiveDate>,
    }

    #[test]
    fn bad_date_names_the_field() {
        let Err(err) = from_json_slice::<Body>(br#"{"birth_date":"1990-13-45"}"#) else {
            panic!("bad date accepted");
        };
        assert_eq!(err.field(), Some("birth_date"));
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn unknown_enum_code_names_the_field() {
        let Err(err) = from_json_slice::<Body>(br#"{"activity_type":"flying"}"#) else {
            panic!("unknown activity accepted");
        };
        assert_eq!(err.field(), Some("activity_type"));
    }

    #[test]
    fn syntax_errors_stay_invalid_request() {
        let Err(err) = from_json_slice::<Body>(b"{not json") else {
            panic!("garbage accepted");
        };
        assert_eq!(err.error_code(), 1002);
        assert_eq!(err.field(), None);

        let Err(err) = from_json_slice::<Body>(b"{} {}") else {
            panic!("trailing input accepted");
        };
        assert_eq!(err.error_code(), 1002);
    }

    #[test]
    fn query_parameters_are_named() {
        let Ok(range) = from_query_str::<Range>("from=2024-02-29") else {
            panic!("valid query rejected");
        };
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 2, 29));

        let Err(err) = from_query_str::<Range>("from=2024-13-01") else {
            panic!("bad date accepted");
        };
        assert_eq!(err.field(), Some("from"));
    }

    #[test]
    fn json_content_type_variants() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(has_json_content_type(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/merge-patch+json"),
        );
        assert!(has_json_content_type(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_content_type(&headers));
    }
}
