use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCompanyUserRequest {
    #[validate(email(message = "Username must be a valid email address"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[serde(default)]
    pub is_main: bool,
}

/// Partial update; fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Username must be a valid email address"))]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchUsersRequest {
    #[validate(range(min = 1, message = "Company ID is required"))]
    pub company_id: i64,

    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,
}

impl SearchUsersRequest {
    pub fn for_company(company_id: i64) -> Self {
        Self {
            company_id,
            query: None,
            limit: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("companyId".to_string(), self.company_id.to_string())];
        if let Some(q) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q".to_string(), q.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_pairs_skip_empty_query() {
        let pairs = SearchUsersRequest::for_company(7)
            .with_query("")
            .with_limit(50)
            .query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("companyId".to_string(), "7".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn update_omits_unset_fields() {
        let req = UpdateUserRequest {
            phone: Some("+15550101".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            serde_json::json!({"phone": "+15550101"})
        );
    }
}
