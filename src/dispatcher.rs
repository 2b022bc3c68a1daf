// src/dispatcher.rs
//! Runs one validated [`Command`] against the Notion API.
//!
//! Credentials are resolved first, so a missing token fails every verb
//! before a request is built. Each verb then makes exactly one request,
//! except `page`, which makes three independent ones and reports each
//! section's failure in place.

use crate::api::{NotionApi, NotionTransport};
use crate::config::Command;
use crate::credentials::CredentialSources;
use crate::error::AppError;
use crate::formatting::render_blocks;
use crate::formatting::sections;
use crate::model::Block;
use crate::types::NotionId;

/// Text produced by a command, plus any sections that failed along the way.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub text: String,
    pub failures: Vec<SectionFailure>,
}

impl CommandOutput {
    fn complete(text: String) -> Self {
        Self {
            text,
            failures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit status: partial output still counts as a failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Appends a `## <name>` section, or its error marker if it failed.
    fn section(&mut self, name: &'static str, body: Result<String, AppError>) {
        self.text.push_str(&format!("## {}\n", name));
        match body {
            Ok(body) => self.text.push_str(&body),
            Err(error) => {
                log::warn!("{} section failed: {}", name, error);
                self.text.push_str(&sections::error_marker(&error));
                self.failures.push(SectionFailure {
                    section: name,
                    error,
                });
            }
        }
        self.text.push('\n');
    }
}

/// One failed section of a composite report.
#[derive(Debug)]
pub struct SectionFailure {
    pub section: &'static str,
    pub error: AppError,
}

/// Orchestrates credential resolution, the request, and formatting.
pub struct Dispatcher<'a, T: NotionTransport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: NotionTransport + ?Sized> Dispatcher<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn run(
        &self,
        command: &Command,
        sources: &CredentialSources,
    ) -> Result<CommandOutput, AppError> {
        let credentials = sources.resolve()?;
        log::info!("Using Notion token from {}", credentials.source);
        let api = NotionApi::new(self.transport, &credentials.token);

        log::debug!("Running '{}'", command.verb());
        match command {
            Command::Page { id, page_size } => Ok(page_report(&api, id, *page_size).await),
            Command::Props { id } => {
                let page = api.retrieve_page(id).await?;
                Ok(CommandOutput::complete(sections::props_listing(&page)?))
            }
            Command::Blocks { id, page_size } => Ok(CommandOutput::complete(
                content_section(&api, id, *page_size).await?,
            )),
            Command::Comments { id } => {
                let comments = api.list_comments(id).await?;
                Ok(CommandOutput::complete(sections::comments_listing(
                    &comments,
                )))
            }
            Command::Search { query, page_size } => {
                let results = api.search(query, *page_size).await?;
                Ok(CommandOutput::complete(sections::search_listing(&results)))
            }
            Command::Comment { id, rich_text } => {
                let comment = api.create_comment(id, rich_text.clone()).await?;
                Ok(CommandOutput::complete(sections::comment_posted(&comment)))
            }
            Command::Update { id, payload } => {
                let page = api.update_page(id, payload.clone()).await?;
                Ok(CommandOutput::complete(sections::page_updated(&page)))
            }
            Command::Query {
                database,
                filter,
                page_size,
            } => {
                let rows = api
                    .query_database(database, filter.as_ref(), *page_size)
                    .await?;
                Ok(CommandOutput::complete(sections::query_listing(&rows)?))
            }
            Command::Schema { database } => {
                let database = api.retrieve_database(database).await?;
                Ok(CommandOutput::complete(sections::schema_listing(
                    &database,
                )?))
            }
        }
    }
}

/// The page's blocks as an outline.
async fn content_section<T: NotionTransport + ?Sized>(
    api: &NotionApi<'_, T>,
    id: &NotionId,
    page_size: u32,
) -> Result<String, AppError> {
    let values = api.list_block_children(id, page_size).await?;
    let blocks = Block::parse_list(&values)?;
    if blocks.is_empty() {
        return Ok("(no content)\n".to_string());
    }
    render_blocks(&blocks)
}

/// Properties, content and comments, fetched in that order. A failed fetch
/// leaves an error marker in its section and the others still render.
async fn page_report<T: NotionTransport + ?Sized>(
    api: &NotionApi<'_, T>,
    id: &NotionId,
    page_size: u32,
) -> CommandOutput {
    let mut report = CommandOutput::default();

    let properties = match api.retrieve_page(id).await {
        Ok(page) => sections::page_header(&page).and_then(|header| {
            report.text.push_str(&header);
            report.text.push('\n');
            sections::properties_section(&page)
        }),
        Err(error) => Err(error),
    };
    report.section("Properties", properties);

    report.section("Content", content_section(api, id, page_size).await);

    let comments = api.list_comments(id).await;
    report.section(
        "Comments",
        comments.map(|comments| sections::comments_listing(&comments)),
    );

    report
}
