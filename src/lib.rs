// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod present;
pub mod render;
pub mod transport;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{load_and_validate, ConfigFile};
use crate::document::{TagPath, XmlDocument};
use crate::engine::{
    spawn_poller, CoreCommand, CoreRuntime, EditEvent, FieldValue, Runtime, SyncEvent,
};
use crate::fs::{FileSystem, RealFileSystem};
use crate::present::{HtmlFilePresenter, Presenter, StdoutPresenter};
use crate::render::RendererRegistry;
use crate::transport::{DocumentTransport, HttpTransport};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the HTTP transport
/// - core / runtime / presenter
/// - poller, optional console and Ctrl-C handling (for `watch`)
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    match args.command {
        Command::Render { document, out } => render_once(&cfg, document, out).await,
        Command::Set { path, value } => set_once(&cfg, &path, value).await,
        Command::Watch { out, interactive } => watch(&cfg, out, interactive).await,
    }
}

fn new_core(cfg: &ConfigFile) -> CoreRuntime {
    CoreRuntime::new(
        cfg.device.document.clone(),
        cfg.layout.clone(),
        RendererRegistry::standard(),
        cfg.sync.absent_commit,
    )
}

fn new_transport(cfg: &ConfigFile) -> Result<HttpTransport> {
    Ok(HttpTransport::new(&cfg.device.base_url, cfg.request_timeout())?)
}

/// Render the page once, from the device or from a local file.
async fn render_once(
    cfg: &ConfigFile,
    document: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let doc = match document {
        Some(path) => {
            if !RealFileSystem.exists(&path) {
                bail!("document {:?} does not exist", path);
            }
            let xml = RealFileSystem.read_to_string(&path)?;
            XmlDocument::parse(&xml).with_context(|| format!("parsing {:?}", path))?
        }
        None => new_transport(cfg)?
            .fetch_document(&cfg.device.document)
            .await
            .with_context(|| format!("fetching {}", cfg.device.document))?,
    };

    let mut presenter: Box<dyn Presenter> = match out {
        Some(out) => Box::new(HtmlFilePresenter::new(
            Arc::new(RealFileSystem),
            out,
            cfg.title(),
        )),
        None => Box::new(StdoutPresenter {
            title: cfg.title().to_string(),
        }),
    };

    let mut core = new_core(cfg);
    let step = core.step(SyncEvent::DocumentFetched { result: Ok(doc) });
    for command in step.commands {
        match command {
            CoreCommand::Present(page) => presenter.present(&page)?,
            CoreCommand::Alert(diagnostic) => presenter.alert(&diagnostic),
            other => debug!(?other, "ignoring command in one-shot render"),
        }
    }
    Ok(())
}

/// Fetch, commit one value, and wait for the post to complete.
async fn set_once(cfg: &ConfigFile, path: &str, value: String) -> Result<()> {
    let path = TagPath::parse(path)?;
    let transport = new_transport(cfg)?;

    let doc = transport
        .fetch_document(&cfg.device.document)
        .await
        .with_context(|| format!("fetching {}", cfg.device.document))?;

    let mut core = new_core(cfg);
    core.step(SyncEvent::DocumentFetched { result: Ok(doc) });

    let step = core.step(SyncEvent::Commit(EditEvent::new(
        path.clone(),
        FieldValue::Text(value),
    )));

    let mut posted = false;
    for command in step.commands {
        match command {
            CoreCommand::PostDocument { resource, body } => {
                transport.post_document(&resource, body).await?;
                posted = true;
            }
            CoreCommand::Alert(diagnostic) => bail!("{diagnostic}"),
            other => debug!(?other, "ignoring command in one-shot set"),
        }
    }

    if !posted {
        bail!("{path} is not in {}; nothing was posted", cfg.device.document);
    }
    info!(%path, "value posted");
    Ok(())
}

/// Poll the device and keep `out` rendered until Ctrl-C (or `quit`).
async fn watch(cfg: &ConfigFile, out: PathBuf, interactive: bool) -> Result<()> {
    let transport = Arc::new(new_transport(cfg)?);
    let presenter = HtmlFilePresenter::new(Arc::new(RealFileSystem), out, cfg.title());

    let (rt_tx, rt_rx) = mpsc::channel::<SyncEvent>(64);

    let poller = spawn_poller(cfg.poll_interval(), rt_tx.clone());
    let console = interactive.then(|| crate::console::spawn_console(rt_tx.clone()));

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SyncEvent::ShutdownRequested).await;
        });
    }

    info!(
        base_url = %cfg.device.base_url,
        document = %cfg.device.document,
        interval_ms = cfg.device.poll_interval_ms,
        "watching device"
    );

    let runtime = Runtime::new(new_core(cfg), &rt_tx, rt_rx, transport, presenter);
    drop(rt_tx);
    runtime.run().await?;

    poller.abort();
    if let Some(console) = console {
        console.abort();
    }
    Ok(())
}

/// Simple dry-run output: print the device settings and the page rows.
fn print_dry_run(cfg: &ConfigFile) {
    println!("confsync dry-run");
    println!("  device.base_url = {}", cfg.device.base_url);
    println!("  device.document = {}", cfg.device.document);
    println!("  device.poll_interval_ms = {}", cfg.device.poll_interval_ms);
    println!("  device.request_timeout_ms = {}", cfg.device.request_timeout_ms);
    println!("  sync.absent_commit = {:?}", cfg.sync.absent_commit);
    println!();

    println!("page: {}", cfg.title());
    println!("rows ({}):", cfg.layout.rows.len());
    for row in &cfg.layout.rows {
        println!("  - {}", row.label);
        println!("      path: {} ({:?})", row.path, row.path.addressing());
    }

    debug!("dry-run complete (nothing fetched)");
}
