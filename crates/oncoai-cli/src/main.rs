//! OncoAI survival prediction client.
//! Drives the survival and landing pages headlessly against the prediction API.

mod config;
mod inputs;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use oncoai_client::dom::ids;
use oncoai_client::{
    App, Document, Dom, Event, FileStorage, HttpPredictionApi, SelectedFile, StorageTokenStore,
    TokenStore,
};
use oncoai_common::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oncoai", version, about = "OncoAI survival prediction client")]
struct Cli {
    /// Config file (default: $ONCOAI_CONFIG or ./oncoai.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show whether a session is stored
    Status,
    /// Log in and store the access token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "ONCOAI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, env = "ONCOAI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Predict 3-year survival from one feature vector; unset features are 0
    Predict {
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
        /// TOML or JSON map of feature name to value
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
    },
    /// Upload a CSV or Excel file for batch prediction
    Batch { file: PathBuf },
}

fn token_store(config: &ClientConfig) -> Arc<dyn TokenStore> {
    let path = config
        .storage
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(FileStorage::default_path);
    info!(path = %path.display(), "Session storage");
    Arc::new(StorageTokenStore::new(FileStorage::new(path)))
}

async fn survival_page(
    config: &ClientConfig,
    store: Arc<dyn TokenStore>,
) -> anyhow::Result<(App, Document)> {
    let api = Arc::new(HttpPredictionApi::new(config.api.clone())?);
    let app = App::survival_page(config, store, api);
    let mut doc = Document::survival_page();
    app.load(&mut doc).await;
    Ok((app, doc))
}

/// Print a result container; a failure class maps to a failing exit code.
fn report(doc: &Document, id: &str) -> ExitCode {
    let text = output::text(&doc.inner_html(id));
    let failed = doc.class(id).split_whitespace().any(|c| c == "error");
    if failed {
        eprintln!("{}", text);
        ExitCode::FAILURE
    } else {
        println!("{}", text);
        ExitCode::SUCCESS
    }
}

fn read_selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SelectedFile::new(name, bytes))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = config::load(cli.config.as_deref())?;
    let store = token_store(&config);

    match cli.command {
        Command::Status => {
            let app = App::landing_page(&config, store.clone());
            let mut doc = Document::landing_page();
            app.load(&mut doc).await;
            match store.session() {
                Some(session) => println!("Sesión activa: {}", session.display_name()),
                None => println!("Sin sesión"),
            }
            println!("{}", output::text(&doc.inner_html(ids::MODELS_DESCRIPTION)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Login { username, password } => {
            let (app, mut doc) = survival_page(&config, store).await?;
            doc.set_field_value(ids::PASSWORD_FORM, "username", &username);
            doc.set_field_value(ids::PASSWORD_FORM, "password", &password);
            app.dispatch(Event::LoginSubmitted, &mut doc).await;
            if let Some(location) = doc.location() {
                info!(page = %location, "Redirected");
            }
            Ok(report(&doc, ids::LOGIN_RESULT))
        }
        Command::Register { username, email, full_name, password } => {
            let (app, mut doc) = survival_page(&config, store).await?;
            app.dispatch(Event::RegisterRequested, &mut doc).await;
            doc.set_field_value(ids::REGISTER_FORM, "reg-username", &username);
            doc.set_field_value(ids::REGISTER_FORM, "reg-email", &email);
            doc.set_field_value(ids::REGISTER_FORM, "reg-fullname", &full_name);
            doc.set_field_value(ids::REGISTER_FORM, "reg-password", &password);
            app.dispatch(Event::RegisterSubmitted, &mut doc).await;
            Ok(report(&doc, ids::LOGIN_RESULT))
        }
        Command::Logout => {
            let (app, mut doc) = survival_page(&config, store).await?;
            app.dispatch(Event::LogoutClicked, &mut doc).await;
            Ok(report(&doc, ids::LOGIN_RESULT))
        }
        Command::Predict { set, from } => {
            let values = inputs::collect(&set, from.as_deref())?;
            let (app, mut doc) = survival_page(&config, store).await?;
            for (name, value) in &values {
                doc.set_field_value(ids::PREDICT_FORM, name, value);
            }
            app.dispatch(Event::ManualSubmitted, &mut doc).await;
            Ok(report(&doc, ids::MANUAL_RESULT))
        }
        Command::Batch { file } => {
            let selected = read_selected_file(&file)?;
            let (app, mut doc) = survival_page(&config, store).await?;
            doc.select_file(ids::BATCH_FORM, Some(selected));
            app.dispatch(Event::FileChanged, &mut doc).await;
            info!(label = %output::text(&doc.inner_html(ids::FILE_INPUT_LABEL)), "File selected");
            app.dispatch(Event::BatchSubmitted, &mut doc).await;
            Ok(report(&doc, ids::BATCH_RESULT))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oncoai=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("OncoAI client v{}", env!("CARGO_PKG_VERSION"));
    run(Cli::parse()).await
}
