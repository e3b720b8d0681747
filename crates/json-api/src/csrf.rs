//! CSRF protection for cookie sessions.
//!
//! Double-submit: the `XSRF-TOKEN` cookie is readable by the page script,
//! which echoes it in the `x-csrf-token` header on state-changing requests.
//! Bearer-authenticated requests carry no ambient credentials and are exempt.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore as _, rngs::OsRng};
use salvo::{
    http::{
        Method,
        cookie::{Cookie, SameSite},
    },
    prelude::*,
};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Cookie carrying the CSRF token.
pub(crate) const CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";
/// Header unsafe requests must echo the token in.
pub(crate) const CSRF_HEADER_NAME: &str = "x-csrf-token";

const TOKEN_BYTES: usize = 32;

/// The request's CSRF token, echoed to pages in the shared props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsrfToken(pub(crate) String);

/// Issue the token cookie when missing and reject state-changing guest
/// requests whose header does not match it.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let cookie_secure = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state.site.cookie_secure,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let cookie_token = req
        .cookie(CSRF_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty());

    if changes_state(req.method()) && depot.current_user().is_none() {
        let header_token = req.header::<String>(CSRF_HEADER_NAME);

        let verified = matches!(
            (cookie_token.as_deref(), header_token.as_deref()),
            (Some(cookie), Some(header)) if tokens_match(cookie, header)
        );

        if !verified {
            warn!(path = %req.uri().path(), "rejected request with missing or mismatched csrf token");

            res.render(StatusError::forbidden().brief("CSRF token mismatch"));

            return;
        }
    }

    let token = match cookie_token {
        Some(token) => token,
        None => {
            let token = generate_token();

            res.add_cookie(csrf_cookie(token.clone(), cookie_secure));

            token
        }
    };

    depot.inject(CsrfToken(token));

    ctrl.call_next(req, depot, res).await;
}

fn changes_state(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD && *method != Method::OPTIONS
}

fn generate_token() -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];

    OsRng.fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(expected: &str, given: &str) -> bool {
    expected.len() == given.len()
        && expected
            .bytes()
            .zip(given.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

fn csrf_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((CSRF_COOKIE_NAME, token))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}
