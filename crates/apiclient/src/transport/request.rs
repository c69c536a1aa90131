use http::{HeaderMap, HeaderValue, Method, StatusCode, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::errors::ClientError;

/// Whether a request is on its first send or is the replay issued after a
/// token refresh. A replay is never refreshed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attempt {
    #[default]
    First,
    Replay,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub attempt: Attempt,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            attempt: Attempt::First,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    pub fn as_replay(mut self) -> Self {
        self.attempt = Attempt::Replay;
        self
    }

    pub fn is_replay(&self) -> bool {
        self.attempt == Attempt::Replay
    }

    /// Token carried in the `Authorization` header, without the scheme.
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
    }

    /// Replaces any existing `Authorization` header. An empty or missing
    /// token leaves the request without one.
    pub fn with_bearer(mut self, token: Option<&str>) -> Result<Self, ClientError> {
        self.headers.remove(AUTHORIZATION);
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(ClientError::transport)?;
            value.set_sensitive(true);
            self.headers.insert(AUTHORIZATION, value);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn json_body(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bearer_header_is_replaced_not_duplicated() {
        let request = ApiRequest::get("/companies")
            .with_bearer(Some("old"))
            .unwrap()
            .with_bearer(Some("new"))
            .unwrap();

        assert_eq!(request.headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(request.bearer(), Some("new"));
    }

    #[test]
    fn empty_token_sends_no_header() {
        let request = ApiRequest::get("/companies")
            .with_bearer(Some("old"))
            .unwrap()
            .with_bearer(Some(""))
            .unwrap();

        assert!(request.headers.get(AUTHORIZATION).is_none());
        assert_eq!(request.bearer(), None);
    }

    #[test]
    fn replay_marker_survives_clone() {
        let request = ApiRequest::delete("/users/3").with_query("companyId", 7);
        assert_eq!(request.attempt, Attempt::First);

        let replay = request.clone().as_replay();
        assert!(replay.is_replay());
        assert_eq!(replay.query, vec![("companyId".to_string(), "7".to_string())]);
    }

    #[test]
    fn response_decodes_json() {
        let response = ApiResponse::json_body(StatusCode::OK, &json!({"id": 1}));
        let value: Value = response.json().unwrap();
        assert_eq!(value["id"], 1);
        assert!(response.is_success());
    }
}
