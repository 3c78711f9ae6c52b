//! Data model

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::utils::input_validation::{
    AuthorName, Category, PhoneNumber, PostContent, PostSummary, PostTitle,
};

/// A unique author identifier, assigned by the store.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct AuthorID(u64);

impl From<u64> for AuthorID {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<AuthorID> for u64 {
    fn from(id: AuthorID) -> Self {
        id.0
    }
}

/// A unique post identifier, assigned by the store.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct PostID(u64);

impl From<u64> for PostID {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<PostID> for u64 {
    fn from(id: PostID) -> Self {
        id.0
    }
}

/// A blog author.
///
/// Fields can only be replaced with values that went through validation,
/// and every replacement refreshes `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Display)]
#[display("Author(id={id}, name={name})")]
pub struct Author {
    id: AuthorID,
    name: AuthorName,
    phone_number: Option<PhoneNumber>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Author {
    pub fn new(id: AuthorID, name: AuthorName, phone_number: Option<PhoneNumber>) -> Self {
        Self {
            id,
            name,
            phone_number,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn id(&self) -> AuthorID {
        self.id
    }

    pub fn name(&self) -> &AuthorName {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `None` until the first change after creation
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: AuthorName) {
        self.name = name;
        self.touch();
    }

    pub fn set_phone_number(&mut self, phone_number: Option<PhoneNumber>) {
        self.phone_number = phone_number;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Validated content of a post, without the store-managed fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostFields {
    pub title: PostTitle,
    pub content: PostContent,
    pub summary: PostSummary,
    pub category: Category,
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Display)]
#[display("Post(id={id}, title={title})")]
pub struct Post {
    id: PostID,
    title: PostTitle,
    content: PostContent,
    summary: PostSummary,
    category: Category,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(id: PostID, fields: PostFields) -> Self {
        let PostFields {
            title,
            content,
            summary,
            category,
        } = fields;

        Self {
            id,
            title,
            content,
            summary,
            category,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn id(&self) -> PostID {
        self.id
    }

    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    pub fn content(&self) -> &PostContent {
        &self.content
    }

    pub fn summary(&self) -> &PostSummary {
        &self.summary
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_title(&mut self, title: PostTitle) {
        self.title = title;
        self.touch();
    }

    pub fn set_content(&mut self, content: PostContent) {
        self.content = content;
        self.touch();
    }

    pub fn set_summary(&mut self, summary: PostSummary) {
        self.summary = summary;
        self.touch();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
