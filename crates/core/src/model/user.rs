use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// A user row as listed by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub roles: Vec<Role>,
}

//
// ─── LIST QUERY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// Query parameters for the paged user listing.
///
/// Any change that alters the result set (page size, keyword, role filters) sends
/// the listing back to the first page; sorting keeps the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    sort_field: String,
    role1: Option<Role>,
    role2: Option<Role>,
    key_word: String,
    order: SortOrder,
    page: u32,
    size: u32,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            sort_field: "created_at".to_string(),
            role1: Some(Role::Admin),
            role2: Some(Role::User),
            key_word: String::new(),
            order: SortOrder::Desc,
            page: 1,
            size: 10,
        }
    }
}

impl UserQuery {
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.key_word
    }

    #[must_use]
    pub fn roles(&self) -> (Option<Role>, Option<Role>) {
        (self.role1, self.role2)
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self.page = 1;
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.key_word = keyword.into();
        self.page = 1;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = field.into();
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, role1: Option<Role>, role2: Option<Role>) -> Self {
        self.role1 = role1;
        self.role2 = role2;
        self.page = 1;
        self
    }

    /// Restore the default role filters. Keyword, sort, page and page size stay as they are.
    #[must_use]
    pub fn clear_filters(mut self) -> Self {
        let defaults = Self::default();
        self.role1 = defaults.role1;
        self.role2 = defaults.role2;
        self
    }
}

/// One page of users plus the total page count reported by the server.
///
/// The listing arrives beside `statusCode` in the response body rather than under
/// `data`; a body without `result` is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    #[serde(rename = "result")]
    pub users: Vec<User>,
    #[serde(default)]
    pub total_pages: u32,
}
