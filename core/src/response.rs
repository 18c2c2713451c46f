//! Maps a received `HttpResponse` into display strings.

use crate::http::HttpResponse;

/// The three response fields shown to the user. `Default` is the cleared
/// display, used while a request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseView {
    pub status: String,
    pub headers: String,
    pub body: String,
}

impl ResponseView {
    pub fn clear(&mut self) {
        *self = ResponseView::default();
    }

    pub fn is_cleared(&self) -> bool {
        self.status.is_empty() && self.headers.is_empty() && self.body.is_empty()
    }
}

/// Render status, headers and body. Header order is the transport's order.
pub fn map(response: &HttpResponse) -> ResponseView {
    ResponseView {
        status: response.status.to_string(),
        headers: response
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        body: response.body.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_renders_status_and_headers() {
        let response = HttpResponse {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), "text/plain".to_string()),
                ("X-Id".to_string(), "42".to_string()),
            ],
            body: "hello".to_string(),
        };
        let view = map(&response);
        assert_eq!(view.status, "200");
        assert_eq!(view.headers, "Content-Type: text/plain\nX-Id: 42");
        assert_eq!(view.body, "hello");
    }

    #[test]
    fn map_keeps_header_order_and_duplicates() {
        let response = HttpResponse {
            status: 404,
            headers: vec![
                ("Set-Cookie".to_string(), "b=2".to_string()),
                ("Set-Cookie".to_string(), "a=1".to_string()),
            ],
            body: String::new(),
        };
        let view = map(&response);
        assert_eq!(view.status, "404");
        assert_eq!(view.headers, "Set-Cookie: b=2\nSet-Cookie: a=1");
    }

    #[test]
    fn map_without_headers_is_empty_text() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        let view = map(&response);
        assert_eq!(view.headers, "");
        assert_eq!(view.status, "204");
    }

    #[test]
    fn clear_resets_every_field() {
        let mut view = ResponseView {
            status: "500".to_string(),
            headers: "A: b".to_string(),
            body: "oops".to_string(),
        };
        view.clear();
        assert!(view.is_cleared());
    }
}
