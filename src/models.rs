use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into() }
    }

    /// "First Last", trimmed so a blank half leaves no stray space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: String,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: String,
}

/// Fields supplied when inserting a post; the store assigns `id` and `created`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub author: Author,
    pub title: String,
    pub content: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// API view of a post, with the author collapsed to a display string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: String,
}

impl BlogPost {
    pub(crate) fn assign(new: NewBlogPost) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author: new.author,
            title: new.title,
            content: new.content,
            created: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_response(&self) -> BlogPostResponse {
        BlogPostResponse {
            id: self.id.clone(),
            author: self.author.display_name(),
            title: self.title.clone(),
            content: self.content.clone(),
            created: self.created.clone(),
        }
    }
}
