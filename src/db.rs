//! In-memory record store, saved as JSON

use crate::{
    models::{Author, AuthorID, Post, PostFields, PostID},
    utils::input_validation::{AuthorLookup, AuthorName, PhoneNumber},
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, ErrorKind::NotFound},
    path::PathBuf,
};
use thiserror::Error;

#[derive(Serialize, Deserialize, Default)]
pub struct Database {
    #[serde(skip)]
    path: Option<PathBuf>,
    authors: BTreeMap<AuthorID, Author>,
    posts: BTreeMap<PostID, Post>,
    /// Last ids handed out. Never decremented, so ids are not reused.
    last_author_id: u64,
    last_post_id: u64,
}

#[derive(Debug, Error)]
pub enum DBError {
    #[error("Invalid author ID: {0}")]
    InvalidAuthorID(AuthorID),
    #[error("Invalid post ID: {0}")]
    InvalidPostID(PostID),
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self, io::Error> {
        match File::open(&path) {
            Ok(f) => {
                let mut db: Self = serde_json::from_reader(f)?;
                db.path = Some(path);
                db.sync_id_counters();
                Ok(db)
            }

            Err(not_found) if not_found.kind() == NotFound => {
                info!("DB file not found, creating new empty DB at {}", path.display());
                let mut new_db = Database::default();
                new_db.path = Some(path);

                // Fail early if the location is not writable
                new_db.save()?;
                Ok(new_db)
            }

            Err(other) => Err(other),
        }
    }

    /// Raises the id counters to the highest stored ids, so that a stale
    /// counter in the file cannot hand out an id that is already taken.
    fn sync_id_counters(&mut self) {
        if let Some(&last) = self.authors.keys().next_back() {
            let last = u64::from(last);
            if last > self.last_author_id {
                warn!("Author id counter behind stored ids, raising it to {last}");
                self.last_author_id = last;
            }
        }
        if let Some(&last) = self.posts.keys().next_back() {
            let last = u64::from(last);
            if last > self.last_post_id {
                warn!("Post id counter behind stored ids, raising it to {last}");
                self.last_post_id = last;
            }
        }
    }

    pub fn save(&self) -> Result<(), io::Error> {
        if let Some(path) = &self.path {
            let file = File::create(path)?;
            serde_json::to_writer_pretty(file, self)?;
        }
        Ok(())
    }

    /// Stores a new author under a fresh id.
    /// Name uniqueness must already have been checked against this store.
    pub fn insert_author(&mut self, name: AuthorName, phone: Option<PhoneNumber>) -> AuthorID {
        self.last_author_id += 1;
        let id = AuthorID::from(self.last_author_id);
        self.authors.insert(id, Author::new(id, name, phone));
        id
    }

    pub fn get_author(&self, id: AuthorID) -> Result<&Author, DBError> {
        self.authors.get(&id).ok_or(DBError::InvalidAuthorID(id))
    }

    pub fn get_author_mut(&mut self, id: AuthorID) -> Result<&mut Author, DBError> {
        self.authors
            .get_mut(&id)
            .ok_or(DBError::InvalidAuthorID(id))
    }

    pub fn lookup_author_name(&self, name: &str) -> Option<&Author> {
        self.authors
            .values()
            .find(|author| author.name().as_str() == name)
    }

    pub fn list_authors(&self) -> impl Iterator<Item = &Author> + '_ {
        self.authors.values()
    }

    pub fn remove_author(&mut self, id: AuthorID) -> Result<Author, DBError> {
        self.authors
            .remove(&id)
            .ok_or(DBError::InvalidAuthorID(id))
    }

    pub fn insert_post(&mut self, fields: PostFields) -> PostID {
        self.last_post_id += 1;
        let id = PostID::from(self.last_post_id);
        self.posts.insert(id, Post::new(id, fields));
        id
    }

    pub fn get_post(&self, id: PostID) -> Result<&Post, DBError> {
        self.posts.get(&id).ok_or(DBError::InvalidPostID(id))
    }

    pub fn get_post_mut(&mut self, id: PostID) -> Result<&mut Post, DBError> {
        self.posts.get_mut(&id).ok_or(DBError::InvalidPostID(id))
    }

    pub fn list_posts(&self) -> impl Iterator<Item = &Post> + '_ {
        self.posts.values()
    }

    pub fn remove_post(&mut self, id: PostID) -> Result<Post, DBError> {
        self.posts.remove(&id).ok_or(DBError::InvalidPostID(id))
    }
}

impl AuthorLookup for Database {
    fn find_author_by_name(&self, name: &str) -> Option<AuthorID> {
        self.lookup_author_name(name).map(Author::id)
    }
}
