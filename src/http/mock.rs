//! In-memory transport that replays canned responses.
//!
//! Used by the provider tests: responses are queued in the order the provider
//! is expected to issue requests, and every request is recorded for
//! assertions afterwards.

use std::{cell::RefCell, collections::VecDeque};

use super::{HttpTransport, Method, RequestOptions, Response};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub options: RequestOptions,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Response>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: impl IntoIterator<Item = Response>) -> Self {
        let transport = Self::new();
        transport.responses.borrow_mut().extend(responses);
        transport
    }

    pub fn push(&self, response: Response) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Responses that were queued but never consumed.
    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl HttpTransport for MockTransport {
    fn request(&self, method: Method, url: &str, options: RequestOptions) -> Result<Response> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            options,
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| {
                Error::Transport(format!("no response queued for {} {}", method, url))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order_and_records() {
        let transport =
            MockTransport::with_responses([Response::new(200, "one"), Response::new(201, "two")]);

        let first = transport
            .request(Method::Get, "https://a", RequestOptions::new())
            .unwrap();
        let second = transport
            .request(Method::Post, "https://b", RequestOptions::new())
            .unwrap();

        assert_eq!(first.body, "one");
        assert_eq!(second.status, 201);
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.requests()[1].method, Method::Post);
        assert_eq!(transport.remaining(), 0);
    }

    #[test]
    fn test_empty_queue_is_transport_error() {
        let transport = MockTransport::new();
        let err = transport
            .request(Method::Get, "https://a", RequestOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
