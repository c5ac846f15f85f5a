// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Authentication support for job requests
//!
//! Data Lake Analytics accepts Azure Active Directory bearer tokens. Token
//! acquisition is left to the caller; this module only attaches the token.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Credentials attached to every request
#[derive(Debug)]
pub enum Credentials {
    /// Send no `Authorization` header
    Anonymous,
    /// Send `Authorization: Bearer <token>`
    BearerToken(SecretString),
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken(SecretString::from(token.into()))
    }
}

/// Add authentication headers to a request
///
/// The header value is marked sensitive so it is not printed by `Debug`
/// implementations further down the stack.
pub fn add_auth_headers(credentials: &Credentials, headers: &mut HeaderMap) -> Result<()> {
    match credentials {
        Credentials::Anonymous => Ok(()),
        Credentials::BearerToken(token) => {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|e| Error::InvalidHeader(format!("Invalid bearer token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_header() {
        let mut headers = HeaderMap::new();
        add_auth_headers(&Credentials::bearer("t0ken"), &mut headers).unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer t0ken");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_anonymous_adds_nothing() {
        let mut headers = HeaderMap::new();
        add_auth_headers(&Credentials::Anonymous, &mut headers).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let debug = format!("{:?}", Credentials::bearer("super-secret"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let mut headers = HeaderMap::new();
        let err = add_auth_headers(&Credentials::bearer("bad\ntoken"), &mut headers).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
