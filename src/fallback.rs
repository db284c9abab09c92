use crate::body;
use crate::table::{DispatchError, MappingTable};
use http::request::Parts;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, LOCATION};
use hyper::{Response, StatusCode};
use std::sync::Arc;

/// Handles requests that are not go-get discovery queries.
pub trait Fallback: Send + Sync {
    fn respond(&self, host: &str, head: &Parts) -> Response<Full<Bytes>>;
}

/// Sends browsers to the repository itself, keeping any sub-package path.
pub struct BrowseFallback {
    table: Arc<MappingTable>,
}

impl BrowseFallback {
    pub fn new(table: Arc<MappingTable>) -> Self {
        Self { table }
    }
}

impl Fallback for BrowseFallback {
    fn respond(&self, host: &str, head: &Parts) -> Response<Full<Bytes>> {
        let path = head.uri.path();
        match self.table.resolve(host, path) {
            Ok(redirect) => {
                let location = format!("{}{}", redirect.redirect_root, redirect.tail);
                match HeaderValue::try_from(location.as_str()) {
                    Ok(value) => {
                        log::info!("{} {} -> [browse] {}", head.method, head.uri, location);
                        let mut resp = body::empty(StatusCode::FOUND);
                        resp.headers_mut().insert(LOCATION, value);
                        resp
                    }
                    Err(e) => {
                        log::error!(
                            "{} {} -> [invalid location] {:?} : {}",
                            head.method,
                            head.uri,
                            location,
                            e
                        );
                        body::empty(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                }
            }
            Err(DispatchError::Render { pattern, source }) => {
                log::error!(
                    "{} {} -> [render error] {:?} : {}",
                    head.method,
                    head.uri,
                    pattern,
                    source
                );
                body::empty(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Err(e) => {
                log::info!("{} {} -> [browse] {}", head.method, head.uri, e);
                let message = format!("No mapping found for {}", path);
                body::text(StatusCode::NOT_FOUND, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::advanced_table;
    use hyper::Request;

    fn head(uri: &str) -> Parts {
        Request::get(uri).body(()).unwrap().into_parts().0
    }

    #[test]
    fn redirects_with_tail() {
        let fallback = BrowseFallback::new(Arc::new(advanced_table()));
        let resp = fallback.respond("myhost.com", &head("/customPath/subpkg/path"));
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers()[LOCATION],
            "https://github.com/path/to/custom/subpkg/path"
        );
    }

    #[test]
    fn redirects_exact_repo() {
        let fallback = BrowseFallback::new(Arc::new(advanced_table()));
        let resp = fallback.respond("myhost.com", &head("/hg/owner/repo"));
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[LOCATION], "https://bitbucket.org/owner/repo");
    }

    #[test]
    fn unmapped_is_not_found() {
        let fallback = BrowseFallback::new(Arc::new(advanced_table()));
        let resp = fallback.respond("myhost.com", &head("/unmapped"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
