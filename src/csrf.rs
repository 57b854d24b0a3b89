//! Double-submit CSRF protection.
//!
//! Each browser gets a random secret in the [`CSRF_COOKIE`] cookie. Forms embed a token made of a
//! fresh one-time pad followed by `pad ^ secret`, so every issued token looks different while
//! still unmasking to the same secret. Submissions are accepted only when the posted
//! [`CSRF_FIELD`] unmasks to the secret from the cookie.

use crate::error::{CookieHeaderSnafu, CsrfMismatchSnafu, RegistrarResult};
use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use cookie::{Cookie, SameSite};
use rand::{Rng, rng};
use snafu::{ResultExt, ensure};
use std::convert::Infallible;

pub const CSRF_COOKIE: &str = "registrar_csrf";
pub const CSRF_FIELD: &str = "csrf_token";

const SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct CsrfSecret([u8; SECRET_LEN]);

impl CsrfSecret {
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SECRET_LEN];
        rng().fill(&mut bytes);
        Self(bytes)
    }

    fn decode(encoded: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        bytes.try_into().ok().map(Self)
    }

    fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == CSRF_COOKIE)
            .and_then(|cookie| Self::decode(cookie.value()))
    }

    /// A new masked token for this secret. Never the same twice.
    pub fn issue_token(&self) -> String {
        let mut pad = [0_u8; SECRET_LEN];
        rng().fill(&mut pad);

        let mut token = Vec::with_capacity(SECRET_LEN * 2);
        token.extend_from_slice(&pad);
        token.extend(pad.iter().zip(self.0.iter()).map(|(p, s)| p ^ s));

        URL_SAFE_NO_PAD.encode(token)
    }

    pub fn verify(&self, token: &str) -> bool {
        let Ok(bytes) = URL_SAFE_NO_PAD.decode(token.trim()) else {
            return false;
        };
        if bytes.len() != SECRET_LEN * 2 {
            return false;
        }

        let (pad, masked) = bytes.split_at(SECRET_LEN);
        // constant time, no early exit on the first differing byte
        pad.iter()
            .zip(masked)
            .zip(self.0.iter())
            .fold(0_u8, |acc, ((p, m), s)| acc | ((p ^ m) ^ s))
            == 0
    }

    pub fn to_cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build((CSRF_COOKIE, self.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(secure)
            .build()
    }
}

/// The CSRF secret for the current request, minted when the browser didn't send one.
pub struct CsrfCookie {
    secret: CsrfSecret,
    is_new: bool,
}

impl CsrfCookie {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        CsrfSecret::from_headers(headers).map_or_else(
            || Self {
                secret: CsrfSecret::generate(),
                is_new: true,
            },
            |secret| Self {
                secret,
                is_new: false,
            },
        )
    }

    pub fn issue_token(&self) -> String {
        self.secret.issue_token()
    }

    pub fn verify(&self, token: Option<&str>) -> RegistrarResult<()> {
        // a freshly minted secret can't have been used to issue the posted token
        ensure!(!self.is_new, CsrfMismatchSnafu);
        ensure!(
            token.is_some_and(|token| self.secret.verify(token)),
            CsrfMismatchSnafu
        );
        Ok(())
    }

    /// Adds the `Set-Cookie` header when the secret was minted for this request.
    pub fn attach(&self, mut response: Response, secure: bool) -> RegistrarResult<Response> {
        if self.is_new {
            let value = HeaderValue::try_from(self.secret.to_cookie(secure).to_string())
                .context(CookieHeaderSnafu)?;
            response.headers_mut().append(SET_COOKIE, value);
        }
        Ok(response)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CsrfCookie {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
