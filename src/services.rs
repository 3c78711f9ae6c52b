//! Write path for authors and posts.
//!
//! Every value is validated before anything is stored, so a rejected
//! request leaves the store untouched.
use crate::db::{DBError, Database};
use crate::models::{Author, AuthorID, Post, PostFields, PostID};
use crate::utils::input_validation::{
    validate_category, validate_content, validate_name, validate_phone_number, validate_summary,
    validate_title, ValidationError,
};
use log::{info, warn};
use thiserror::Error;

pub struct Service {
    db: Database,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DBError(#[from] DBError),
}

/// Raw input for a new post
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: String,
}

impl PostDraft {
    /// Validates all fields, reporting the first failing one
    pub fn validate(&self) -> Result<PostFields, ValidationError> {
        Ok(PostFields {
            title: validate_title(&self.title)?,
            content: validate_content(&self.content)?,
            summary: validate_summary(&self.summary)?,
            category: validate_category(&self.category)?,
        })
    }
}

/// Raw input for a post edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
}

fn rejected<T>(result: Result<T, ValidationError>, what: &str) -> Result<T, ValidationError> {
    if let Err(error) = &result {
        warn!("Rejected {what}: {error}");
    }
    result
}

impl Service {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.db.save()
    }

    /// Registers a new author. A blank phone number is stored as absent.
    pub fn create_author(&mut self, name: &str, phone: &str) -> Result<AuthorID, ServiceError> {
        let name = rejected(validate_name(&self.db, name), "new author")?;
        let phone = rejected(validate_phone_number(phone), "new author")?;

        let id = self.db.insert_author(name, phone);
        info!("Author {} created", self.db.get_author(id)?);
        Ok(id)
    }

    /// Renames an author. Keeping the current name is not a conflict.
    pub fn rename_author(&mut self, id: AuthorID, name: &str) -> Result<(), ServiceError> {
        if self.db.get_author(id)?.name().as_str() == name {
            return Ok(());
        }

        let name = rejected(validate_name(&self.db, name), "author rename")?;
        let author = self.db.get_author_mut(id)?;
        author.set_name(name);

        info!("Author {} renamed", author);
        Ok(())
    }

    pub fn set_author_phone(&mut self, id: AuthorID, phone: &str) -> Result<(), ServiceError> {
        let phone = rejected(validate_phone_number(phone), "phone number")?;
        let author = self.db.get_author_mut(id)?;
        author.set_phone_number(phone);

        info!("Phone number of {} updated", author);
        Ok(())
    }

    pub fn get_author(&self, id: AuthorID) -> Result<&Author, ServiceError> {
        Ok(self.db.get_author(id)?)
    }

    pub fn lookup_author(&self, name: &str) -> Option<&Author> {
        self.db.lookup_author_name(name)
    }

    pub fn list_authors(&self) -> impl Iterator<Item = &Author> + '_ {
        self.db.list_authors()
    }

    pub fn delete_author(&mut self, id: AuthorID) -> Result<(), ServiceError> {
        let author = self.db.remove_author(id)?;
        info!("{} deleted", author);
        Ok(())
    }

    /// Publishes a new post once every field passes validation.
    pub fn create_post(&mut self, draft: &PostDraft) -> Result<PostID, ServiceError> {
        let fields = rejected(draft.validate(), "new post")?;

        let id = self.db.insert_post(fields);
        info!("Post {} created", self.db.get_post(id)?);
        Ok(id)
    }

    /// Applies the given changes all at once, or none of them.
    pub fn update_post(&mut self, id: PostID, update: &PostUpdate) -> Result<(), ServiceError> {
        // Unknown ids take precedence over invalid values
        self.db.get_post(id)?;

        let title = update.title.as_deref().map(validate_title).transpose();
        let title = rejected(title, "post update")?;
        let content = update.content.as_deref().map(validate_content).transpose();
        let content = rejected(content, "post update")?;
        let summary = update.summary.as_deref().map(validate_summary).transpose();
        let summary = rejected(summary, "post update")?;
        let category = update.category.as_deref().map(validate_category).transpose();
        let category = rejected(category, "post update")?;

        let post = self.db.get_post_mut(id)?;
        if let Some(title) = title {
            post.set_title(title);
        }
        if let Some(content) = content {
            post.set_content(content);
        }
        if let Some(summary) = summary {
            post.set_summary(summary);
        }
        if let Some(category) = category {
            post.set_category(category);
        }

        info!("Post {} updated", post);
        Ok(())
    }

    pub fn get_post(&self, id: PostID) -> Result<&Post, ServiceError> {
        Ok(self.db.get_post(id)?)
    }

    pub fn list_posts(&self) -> impl Iterator<Item = &Post> + '_ {
        self.db.list_posts()
    }

    pub fn delete_post(&mut self, id: PostID) -> Result<(), ServiceError> {
        let post = self.db.remove_post(id)?;
        info!("{} deleted", post);
        Ok(())
    }
}
