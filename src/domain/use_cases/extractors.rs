use actix_web::{http::header, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

/// Extractor for the optional `Authorization` header. Never rejects the
/// request: validation must run before any credential is examined, so the
/// handler receives whatever was sent and defers the decision.
///
/// A header without the `Bearer ` prefix is passed through untouched; it
/// will fail verification downstream.
#[derive(Debug)]
pub struct MaybeBearer(pub Option<String>);

impl MaybeBearer {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for MaybeBearer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|raw| raw.strip_prefix("Bearer ").unwrap_or(raw).to_string());

        ready(Ok(MaybeBearer(token)))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn absent_header_yields_none() {
        let req = TestRequest::default().to_http_request();
        let bearer = MaybeBearer::extract(&req).await.unwrap();
        assert!(bearer.token().is_none());
    }

    #[actix_web::test]
    async fn bearer_prefix_is_stripped() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc123"))
            .to_http_request();
        let bearer = MaybeBearer::extract(&req).await.unwrap();
        assert_eq!(bearer.token(), Some("abc123"));
    }

    #[actix_web::test]
    async fn malformed_header_passes_through() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcg=="))
            .to_http_request();
        let bearer = MaybeBearer::extract(&req).await.unwrap();
        assert_eq!(bearer.token(), Some("Basic dXNlcg=="));
    }
}
