use std::sync::Arc;

use anyhow::{bail, Context};
use catalog_client::{
    Book, CatalogClient, ClientSettings, CreateView, DetailView, Field, ListView, Platform,
    SingleState, SingleView,
};
use catalog_kernel::settings::{Settings, TelemetrySettings};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog", version, about = "Book catalog service and client")]
struct Cli {
    /// Network environment used to pick the books endpoint
    #[arg(long, global = true, value_parser = parse_platform)]
    platform: Option<Platform>,

    /// Books endpoint, overriding the configured one
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the catalog service
    Serve,
    /// List every book
    List,
    /// Show one book
    Show { id: String },
    /// Add a book
    Add(FieldArgs),
    /// Edit a book; unspecified fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a book
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    language: Option<String>,
}

impl FieldArgs {
    fn values(self) -> impl Iterator<Item = (Field, String)> {
        [
            (Field::Title, self.title),
            (Field::Author, self.author),
            (Field::Genre, self.genre),
            (Field::Language, self.language),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
    }
}

fn parse_platform(value: &str) -> Result<Platform, String> {
    value.parse().map_err(|e: catalog_client::ClientError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve().await,
        command => {
            catalog_telemetry::init(&TelemetrySettings {
                log_filter: "warn".to_string(),
                ..TelemetrySettings::default()
            })?;
            let client = connect(cli.platform, cli.url)?;
            run_client(client, command).await
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "catalog service starting");
    catalog_app::App::bootstrap(settings).await?.serve().await
}

fn connect(platform: Option<Platform>, url: Option<String>) -> anyhow::Result<Arc<CatalogClient>> {
    let settings = match (platform, url) {
        (platform, Some(url)) => ClientSettings::new(platform.unwrap_or_default(), url),
        (Some(platform), None) => {
            ClientSettings::resolve(platform, |name| std::env::var(name).ok())
        }
        (None, None) => ClientSettings::load()?,
    };

    tracing::debug!(url = %settings.books_url, "using catalog endpoint");
    Ok(Arc::new(CatalogClient::new(&settings)?))
}

async fn run_client(client: Arc<CatalogClient>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let mut view = ListView::new(client);
            if !view.focus().await {
                bail!("Error fetching books");
            }
            for book in view.books() {
                print_row(book);
            }
        }
        Command::Show { id } => {
            let mut view = SingleView::new(client, id);
            view.mount().await;
            match view.state() {
                SingleState::Loaded(book) => print_book(book),
                _ => bail!(catalog_client::views::NO_BOOK),
            }
        }
        Command::Add(fields) => {
            let mut view = CreateView::new(client);
            for (field, value) in fields.values() {
                view.set(field, value);
            }
            let ack = view.submit().await?;
            println!("{}", ack.message);
        }
        Command::Edit { id, fields } => {
            let mut view = DetailView::new(client, id);
            view.mount().await;
            if let Some(notice) = view.notice() {
                bail!("{}", notice.text());
            }
            for (field, value) in fields.values() {
                view.set(field, value);
            }
            let ack = view.submit_update().await?;
            println!("{}", ack.message);
        }
        Command::Delete { id, yes } => {
            if !yes {
                bail!("refusing to delete {id} without --yes");
            }
            let mut view = DetailView::new(client, id);
            view.request_delete();
            let ack = view.confirm_delete().await?;
            println!("{}", ack.message);
        }
        Command::Serve => unreachable!("serve is handled before connecting"),
    }

    Ok(())
}

fn print_row(book: &Book) {
    println!("{}\t{}\t{}", book.id, book.title, book.author);
}

fn print_book(book: &Book) {
    println!("Title: {}", book.title);
    println!("Author: {}", book.author);
    println!("Genre: {}", book.genre);
    println!("Language: {}", book.language);
}
