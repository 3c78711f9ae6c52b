use std::path::PathBuf;

use anyhow::Result;
use blotter::db::Database;
use blotter::models::*;
use blotter::services::{PostDraft, PostUpdate, Service};
use blotter::utils::input_validation::Category;
use derive_more::Display;
use inquire::{Confirm, Editor, Select, Text};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const DB_FILE: &str = "blog.json";
const DB_ENV: &str = "BLOG_DB";
const LOG_FILE: &str = "./blotter.log";

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// A text menu
trait Menu {
    /// Runs the menu once. Returns `None` when the menu is done,
    /// `Some(())` to show it again.
    fn enter(&mut self) -> Result<MenuExit>;

    /// Runs the menu until it exits, printing errors along the way.
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

pub struct App {
    service: Service,
}

impl App {
    pub fn new(service: Service) -> Self {
        App { service }
    }

    pub fn start(&mut self) -> Result<()> {
        println!("Welcome to blotter.");
        self.enter_loop();
        self.service.save()?;
        Ok(())
    }
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Manage authors")]
            Authors,
            #[display("Manage posts")]
            Posts,
            #[display("Save")]
            Save,
            #[display("Quit")]
            Exit,
        }

        let choice = Select::new("What do you want to do?", Choice::iter().collect()).prompt()?;

        match choice {
            Choice::Authors => AuthorsMenu {
                service: &mut self.service,
            }
            .enter_loop(),
            Choice::Posts => PostsMenu {
                service: &mut self.service,
            }
            .enter_loop(),
            Choice::Save => self.service.save()?,
            Choice::Exit => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

struct AuthorsMenu<'srv> {
    service: &'srv mut Service,
}

impl AuthorsMenu<'_> {
    /// Lets the user pick an author, `None` if there are none or on escape
    fn pick(&self, message: &str) -> Result<Option<AuthorID>> {
        let authors: Vec<&Author> = self.service.list_authors().collect();
        if authors.is_empty() {
            println!("[*] No authors yet");
            return Ok(None);
        }
        Ok(Select::new(message, authors)
            .prompt_skippable()?
            .map(Author::id))
    }
}

impl Menu for AuthorsMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("New author")]
            Create,
            #[display("Show an author")]
            Show,
            #[display("Rename an author")]
            Rename,
            #[display("Change a phone number")]
            SetPhone,
            #[display("Delete an author")]
            Delete,
            #[display("Back")]
            Back,
        }

        let choice = Select::new("Authors", Choice::iter().collect()).prompt()?;
        match choice {
            Choice::Create => {
                let name = Text::new("Name:").prompt()?;
                let phone = Text::new("Phone number (optional):").prompt()?;
                let id = self.service.create_author(&name, &phone)?;
                println!("{}", self.service.get_author(id)?);
            }

            Choice::Show => {
                if let Some(id) = self.pick("Choose an author:")? {
                    let author = self.service.get_author(id)?;
                    let phone = author
                        .phone_number()
                        .map(|p| p.as_str())
                        .unwrap_or("-");
                    println!(
                        "\n[{}]\nName: {}\nPhone: {}\nCreated: {}\n",
                        author.id(),
                        author.name(),
                        phone,
                        author.created_at()
                    );
                }
            }

            Choice::Rename => {
                if let Some(id) = self.pick("Choose an author:")? {
                    let name = Text::new("New name:").prompt()?;
                    self.service.rename_author(id, &name)?;
                }
            }

            Choice::SetPhone => {
                if let Some(id) = self.pick("Choose an author:")? {
                    let phone = Text::new("New phone number (empty to remove):").prompt()?;
                    self.service.set_author_phone(id, &phone)?;
                }
            }

            Choice::Delete => {
                if let Some(id) = self.pick("Choose an author:")? {
                    if Confirm::new("Really delete this author?")
                        .with_default(false)
                        .prompt()?
                    {
                        self.service.delete_author(id)?;
                    }
                }
            }

            Choice::Back => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

struct PostsMenu<'srv> {
    service: &'srv mut Service,
}

impl PostsMenu<'_> {
    fn pick(&self, message: &str) -> Result<Option<PostID>> {
        let posts: Vec<&Post> = self.service.list_posts().collect();
        if posts.is_empty() {
            println!("[*] No posts yet");
            return Ok(None);
        }
        Ok(Select::new(message, posts).prompt_skippable()?.map(Post::id))
    }
}

fn prompt_category() -> Result<String> {
    Ok(Select::new("Category:", Category::iter().collect())
        .prompt()?
        .to_string())
}

impl Menu for PostsMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Write a post")]
            Create,
            #[display("Read a post")]
            Read,
            #[display("Edit a post")]
            Edit,
            #[display("Delete a post")]
            Delete,
            #[display("Back")]
            Back,
        }

        #[derive(EnumIter, Display)]
        enum Field {
            #[display("Title")]
            Title,
            #[display("Content")]
            Content,
            #[display("Summary")]
            Summary,
            #[display("Category")]
            Category,
        }

        let choice = Select::new("Posts", Choice::iter().collect()).prompt()?;
        match choice {
            Choice::Create => {
                let draft = PostDraft {
                    title: Text::new("Title:").prompt()?,
                    content: Editor::new("Content:").prompt()?,
                    summary: Text::new("Summary:").prompt()?,
                    category: prompt_category()?,
                };
                let id = self.service.create_post(&draft)?;
                println!("{}", self.service.get_post(id)?);
            }

            Choice::Read => {
                if let Some(id) = self.pick("Choose a post:")? {
                    let post = self.service.get_post(id)?;
                    println!(
                        "\n[{}] {}\nCategory: {}\n\n{}\n\n{}\n===============",
                        post.id(),
                        post.title(),
                        post.category(),
                        post.summary(),
                        post.content()
                    );
                }
            }

            Choice::Edit => {
                if let Some(id) = self.pick("Choose a post:")? {
                    let mut update = PostUpdate::default();
                    match Select::new("Field to edit:", Field::iter().collect()).prompt()? {
                        Field::Title => update.title = Some(Text::new("New title:").prompt()?),
                        Field::Content => {
                            let current = self.service.get_post(id)?.content().to_string();
                            update.content = Some(
                                Editor::new("New content:")
                                    .with_predefined_text(&current)
                                    .prompt()?,
                            )
                        }
                        Field::Summary => {
                            update.summary = Some(Text::new("New summary:").prompt()?)
                        }
                        Field::Category => update.category = Some(prompt_category()?),
                    }
                    self.service.update_post(id, &update)?;
                }
            }

            Choice::Delete => {
                if let Some(id) = self.pick("Choose a post:")? {
                    if Confirm::new("Really delete this post?")
                        .with_default(false)
                        .prompt()?
                    {
                        self.service.delete_post(id)?;
                    }
                }
            }

            Choice::Back => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

fn main() -> anyhow::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;

    let path = std::env::var_os(DB_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DB_FILE));
    let db = Database::open(path)?;
    App::new(Service::new(db)).start()
}
