use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::transport::params::QueryParams;
use crate::transport::payload::{Body, MultipartBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to issue one API call and check its response.
///
/// Built fresh for every call and consumed by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor<V> {
    /// Path segments relative to the API root; each one is percent-encoded on its own.
    pub path: Vec<String>,
    pub method: Method,
    pub parameters: QueryParams,
    pub body: Body,
    pub headers: BTreeMap<String, String>,
    pub validator: V,
}

impl<V> RequestDescriptor<V> {
    pub fn new<I, S>(method: Method, path: I, validator: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            method,
            parameters: QueryParams::new(),
            body: Body::Empty,
            headers: BTreeMap::new(),
            validator,
        }
    }

    pub fn with_parameters(mut self, parameters: QueryParams) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_json_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Body::Json(body);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        self
    }

    /// Multipart bodies carry no explicit content type; the boundary is set on send.
    pub fn with_multipart_body(mut self, body: MultipartBody) -> Self {
        self.body = Body::Multipart(body);
        self
    }

    /// Path as it appears in the endpoint table, e.g. `/emails/e1`.
    pub fn path_display(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::validator::Permissive;

    #[test]
    fn new_descriptor_starts_without_body_or_parameters() {
        let descriptor = RequestDescriptor::new(Method::Get, ["chats", "c1"], Permissive);
        assert_eq!(descriptor.path_display(), "/chats/c1");
        assert_eq!(descriptor.body, Body::Empty);
        assert!(descriptor.parameters.is_empty());
        assert!(descriptor.headers.is_empty());
    }

    #[test]
    fn json_body_sets_content_type() {
        let descriptor = RequestDescriptor::new(Method::Patch, ["chats", "c1"], Permissive)
            .with_json_body(Map::new());
        assert_eq!(
            descriptor.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }
}
