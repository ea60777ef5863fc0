//! Header authentication.
//!
//! Order matters for deterministic error reporting: header presence and
//! shape first, then the credential match, then the content type.

use crate::server::{
    credentials::CredentialStore,
    error::{Error, Result},
};
use axum::http::HeaderMap;

pub const CLIENT_ID_HEADER: &str = "x-ibm-client-id";
pub const CLIENT_SECRET_HEADER: &str = "x-ibm-client-secret";
pub const CONTENT_TYPE_HEADER: &str = "content-type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Returns the header's value if it appears exactly once as a non-empty,
/// visible-ASCII string.
pub fn plain_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let mut values = headers.get_all(name).iter();
    let value = values.next()?;
    if values.next().is_some() {
        return None;
    }
    value.to_str().ok().filter(|s| !s.is_empty())
}

/// Authenticates the caller and checks the declared content type.
///
/// An empty `store` is a server misconfiguration and reported as such, but
/// only once the caller has presented well-formed credential headers.
pub fn authenticate(store: &CredentialStore, headers: &HeaderMap) -> Result<()> {
    let (Some(client_id), Some(client_secret)) = (
        plain_header(headers, CLIENT_ID_HEADER),
        plain_header(headers, CLIENT_SECRET_HEADER),
    ) else {
        return Err(Error::InvalidCredentials);
    };

    if store.is_empty() {
        tracing::error!("no valid credential pairs configured");
        return Err(Error::ServerMisconfigured);
    }

    if !store.is_valid(client_id, client_secret) {
        tracing::warn!(client_id, "invalid credentials attempt");
        return Err(Error::InvalidCredentials);
    }

    match plain_header(headers, CONTENT_TYPE_HEADER) {
        Some(JSON_CONTENT_TYPE) => Ok(()),
        _ => Err(Error::InvalidContentType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::credentials::CredentialPair;
    use axum::http::HeaderValue;

    fn store() -> CredentialStore {
        CredentialStore::new(vec![
            CredentialPair::new("client-a", "secret-a"),
            CredentialPair::new("client-b", "secret-b"),
        ])
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for &(name, value) in pairs {
            headers.append(name, HeaderValue::from_static(value));
        }
        headers
    }

    fn valid_headers() -> HeaderMap {
        headers(&[
            (CLIENT_ID_HEADER, "client-b"),
            (CLIENT_SECRET_HEADER, "secret-b"),
            (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        ])
    }

    #[test]
    fn accepts_any_configured_pair() {
        assert_eq!(authenticate(&store(), &valid_headers()), Ok(()));
    }

    #[test]
    fn missing_or_empty_headers_are_invalid_credentials() {
        for headers in [
            headers(&[(CLIENT_SECRET_HEADER, "secret-a")]),
            headers(&[(CLIENT_ID_HEADER, "client-a")]),
            headers(&[(CLIENT_ID_HEADER, ""), (CLIENT_SECRET_HEADER, "secret-a")]),
            HeaderMap::new(),
        ] {
            assert_eq!(
                authenticate(&store(), &headers),
                Err(Error::InvalidCredentials)
            );
        }
    }

    #[test]
    fn repeated_header_is_not_a_plain_string() {
        let headers = headers(&[
            (CLIENT_ID_HEADER, "client-a"),
            (CLIENT_ID_HEADER, "client-a"),
            (CLIENT_SECRET_HEADER, "secret-a"),
            (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        ]);
        assert_eq!(
            authenticate(&store(), &headers),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let headers = headers(&[
            (CLIENT_ID_HEADER, "client-a"),
            (CLIENT_SECRET_HEADER, "secret-b"),
            (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        ]);
        assert_eq!(
            authenticate(&store(), &headers),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn empty_store_is_a_server_error_after_shape_check() {
        let empty = CredentialStore::default();
        assert_eq!(
            authenticate(&empty, &valid_headers()),
            Err(Error::ServerMisconfigured)
        );
        assert_eq!(
            authenticate(&empty, &HeaderMap::new()),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn content_type_must_match_exactly() {
        for content_type in [
            "application/json; charset=utf-8",
            "Application/JSON",
            "text/plain",
        ] {
            let headers = headers(&[
                (CLIENT_ID_HEADER, "client-a"),
                (CLIENT_SECRET_HEADER, "secret-a"),
                (CONTENT_TYPE_HEADER, content_type),
            ]);
            assert_eq!(
                authenticate(&store(), &headers),
                Err(Error::InvalidContentType),
                "{content_type}"
            );
        }
    }

    #[test]
    fn credentials_are_checked_before_content_type() {
        let headers = headers(&[
            (CLIENT_ID_HEADER, "client-a"),
            (CLIENT_SECRET_HEADER, "wrong"),
            (CONTENT_TYPE_HEADER, "text/plain"),
        ]);
        assert_eq!(
            authenticate(&store(), &headers),
            Err(Error::InvalidCredentials)
        );
    }
}
