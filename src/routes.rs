use crate::body;
use crate::config::Config;
use crate::fallback::Fallback;
use crate::page;
use crate::table::{DispatchError, MappingTable, Redirect};
use http::request::Parts;
use http::uri::Authority;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::HOST;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;
use url::form_urlencoded;

pub struct State {
    pub hostname: Option<String>,
    pub table: Arc<MappingTable>,
    pub fallback: Option<Box<dyn Fallback>>,
}

impl From<Config> for State {
    fn from(config: Config) -> Self {
        let Config {
            port: _,
            hostname,
            mappings,
            fallback,
        } = config;
        Self {
            hostname,
            table: mappings,
            fallback,
        }
    }
}

impl State {
    pub fn dispatch(
        &self,
        host: &str,
        path: &str,
        is_discovery: bool,
    ) -> Result<Redirect<'_>, DispatchError> {
        if !is_discovery {
            return Err(DispatchError::NotDiscovery);
        }
        self.table.resolve(host, path)
    }

    /// Host that discovery roots are reported under, without any port.
    fn request_host(&self, head: &Parts) -> String {
        if let Some(hostname) = &self.hostname {
            return hostname.clone();
        }
        let raw = head
            .headers
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| head.uri.authority().map(|a| a.to_string()))
            .unwrap_or_default();
        match raw.parse::<Authority>() {
            Ok(authority) => authority.host().to_string(),
            Err(_) => raw,
        }
    }
}

fn is_discovery(head: &Parts) -> bool {
    let query = head.uri.query().unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "go-get")
        .is_some_and(|(_, value)| value == "1")
}

pub async fn respond_to_request(req: Request<Incoming>, state: &State) -> Response<Full<Bytes>> {
    let (head, _) = req.into_parts();
    respond(&head, state)
}

pub fn respond(head: &Parts, state: &State) -> Response<Full<Bytes>> {
    let host = state.request_host(head);
    let is_discovery = is_discovery(head);

    if is_discovery && !matches!(head.method, Method::GET | Method::HEAD) {
        log::warn!("{} {} -> [method not allowed]", head.method, head.uri);
        return body::empty(StatusCode::METHOD_NOT_ALLOWED);
    }

    match state.dispatch(&host, head.uri.path(), is_discovery) {
        Ok(Redirect {
            root,
            vcs,
            redirect_root,
            tail: _,
        }) => {
            log::info!(
                "{} {} -> {} {} {}",
                head.method,
                head.uri,
                root,
                vcs,
                redirect_root
            );
            body::html(page::render(&root, vcs, &redirect_root))
        }
        Err(DispatchError::NotDiscovery) => match &state.fallback {
            Some(fallback) => fallback.respond(&host, head),
            None => {
                log::info!("{} {} -> [not go-get]", head.method, head.uri);
                body::text(
                    StatusCode::NOT_FOUND,
                    "Not a go-get request and no fallback handler configured".to_string(),
                )
            }
        },
        Err(DispatchError::NoMappingFound) => {
            log::info!("{} {} -> [no match]", head.method, head.uri);
            body::text(
                StatusCode::NOT_FOUND,
                format!("No mapping found for {}", head.uri.path()),
            )
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
    }
}
