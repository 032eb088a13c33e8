//! Request descriptions for the feed service.
//!
//! All operations hit one endpoint, authenticated by a flat API key and the
//! client identifier passed as query parameters.

use crate::domain::{Coordinates, FeedError, ReactionKind};
use reqwest::Url;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A fully formed request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<String>,
}

/// Where and as whom requests are sent.
#[derive(Debug, Clone)]
pub struct FeedEndpoint {
    base: Url,
    api_key: String,
    client: String,
}

impl FeedEndpoint {
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        client: impl Into<String>,
    ) -> Result<Self, FeedError> {
        let base = Url::parse(endpoint)
            .map_err(|e| FeedError::Configuration(format!("endpoint {endpoint:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(FeedError::Configuration(format!(
                "endpoint {endpoint:?} cannot carry a path"
            )));
        }
        Ok(Self {
            base,
            api_key: api_key.into(),
            client: client.into(),
        })
    }

    /// `GET {endpoint}?key&client&limit`
    pub fn fetch(&self, limit: usize) -> FeedRequest {
        let mut url = self.base.clone();
        self.authenticate(&mut url);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        FeedRequest {
            method: Method::Get,
            url,
            body: None,
        }
    }

    /// `GET {endpoint}/{like|dislike}/{id}?key&client`
    pub fn react(&self, message_id: &str, kind: ReactionKind) -> Result<FeedRequest, FeedError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FeedError::Configuration(format!("endpoint {} cannot carry a path", self.base))
            })?
            .pop_if_empty()
            .push(kind.as_str())
            .push(message_id);
        self.authenticate(&mut url);
        Ok(FeedRequest {
            method: Method::Get,
            url,
            body: None,
        })
    }

    /// `POST {endpoint}?key&client&message&lat&lon` with an empty body.
    ///
    /// Coordinates are sent as empty values when the device has no fix.
    pub fn post(&self, text: &str, location: Option<Coordinates>) -> FeedRequest {
        let (lat, lon) = match location {
            Some(c) => (c.latitude.to_string(), c.longitude.to_string()),
            None => (String::new(), String::new()),
        };
        let mut url = self.base.clone();
        self.authenticate(&mut url);
        url.query_pairs_mut()
            .append_pair("message", text)
            .append_pair("lat", &lat)
            .append_pair("lon", &lon);
        FeedRequest {
            method: Method::Post,
            url,
            body: Some(String::new()),
        }
    }

    fn authenticate(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("client", &self.client);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> FeedEndpoint {
        FeedEndpoint::new("https://chat.example.edu/api", "k3y", "me@example.edu").unwrap()
    }

    #[test]
    fn test_fetch_request() {
        let req = endpoint().fetch(40);
        assert_eq!(req.method, Method::Get);
        assert_eq!(
            req.url.as_str(),
            "https://chat.example.edu/api?key=k3y&client=me%40example.edu&limit=40"
        );
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_react_request() {
        let req = endpoint().react("abc123", ReactionKind::Dislike).unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://chat.example.edu/api/dislike/abc123?key=k3y&client=me%40example.edu"
        );
    }

    #[test]
    fn test_react_request_with_trailing_slash() {
        let endpoint = FeedEndpoint::new("https://chat.example.edu/api/", "k", "c").unwrap();
        let req = endpoint.react("1", ReactionKind::Like).unwrap();
        assert_eq!(req.url.path(), "/api/like/1");
    }

    #[test]
    fn test_post_request_with_location() {
        let location = Coordinates {
            longitude: -73.1,
            latitude: 44.5,
        };
        let req = endpoint().post("hello there", Some(location));
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.body.as_deref(), Some(""));
        let pairs: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("message".into(), "hello there".into())));
        assert!(pairs.contains(&("lat".into(), "44.5".into())));
        assert!(pairs.contains(&("lon".into(), "-73.1".into())));
    }

    #[test]
    fn test_post_request_without_location() {
        let req = endpoint().post("hi", None);
        assert!(req.url.as_str().ends_with("&message=hi&lat=&lon="));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            FeedEndpoint::new("not a url", "k", "c"),
            Err(FeedError::Configuration(_))
        ));
        assert!(matches!(
            FeedEndpoint::new("mailto:chat@example.edu", "k", "c"),
            Err(FeedError::Configuration(_))
        ));
    }
}
