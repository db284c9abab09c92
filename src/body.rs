use headers::{ContentType, HeaderMapExt};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::default());
    *resp.status_mut() = status;
    resp
}

pub fn html(page: String) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::from(page));
    resp.headers_mut().typed_insert(ContentType::from(mime::TEXT_HTML_UTF_8));
    resp
}

pub fn text(status: StatusCode, message: String) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::from(format!("{}\n", message)));
    *resp.status_mut() = status;
    resp.headers_mut().typed_insert(ContentType::text_utf8());
    resp
}
