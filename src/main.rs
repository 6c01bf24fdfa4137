//! TCG Catalog - browse the trading card catalog from the terminal
//!
//! Lists come from the local cache when possible and are refreshed in the
//! background; details and images are fetched on demand.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tcg_catalog::cache::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
use tcg_catalog::{
    CatalogConfig, CatalogError, CatalogListState, CatalogService, HttpTransport, ImageBlob,
    ImageQuality, ItemDetailView,
};

/// Trading card catalog client with offline-first listing and search
#[derive(Parser, Debug)]
#[command(name = "tcg_catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// List endpoint of the catalog API
    #[arg(long, default_value_t = CatalogConfig::default().base_url)]
    base_url: String,

    /// Where the card list is persisted between runs
    #[arg(long, value_enum, default_value_t = StoreKind::File)]
    store: StoreKind,

    /// Directory for the persisted cache (default: user cache dir)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every card in the catalog
    List,
    /// Print cards whose name contains QUERY (case-insensitive)
    Search { query: String },
    /// Print the details of one card
    Show { id: String },
    /// Download a card image
    Image {
        id: String,
        #[arg(long, value_enum, default_value_t = QualityArg::High)]
        quality: QualityArg,
        /// Output file (default: <id>-<quality>.png)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Remove the persisted card list
    ClearCache,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StoreKind {
    File,
    Sqlite,
    Memory,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum QualityArg {
    Low,
    High,
}

impl From<QualityArg> for ImageQuality {
    fn from(quality: QualityArg) -> Self {
        match quality {
            QualityArg::Low => ImageQuality::Low,
            QualityArg::High => ImageQuality::High,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = CatalogConfig::with_base_url(args.base_url.clone());

    let transport = match HttpTransport::new(&config) {
        Ok(transport) => transport,
        Err(e) => return fail(&e),
    };

    let result = match args.store {
        StoreKind::File => {
            let dir = args.cache_dir.clone().unwrap_or_else(FileStore::default_dir);
            run(&args.command, &config, transport, FileStore::new(dir)).await
        }
        StoreKind::Sqlite => {
            let path = args
                .cache_dir
                .as_ref()
                .map(|dir| dir.join("catalog.db"))
                .unwrap_or_else(SqliteStore::default_path);
            match SqliteStore::open(&path) {
                Ok(store) => run(&args.command, &config, transport, store).await,
                Err(e) => {
                    log::error!("Failed to open catalog store: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        StoreKind::Memory => run(&args.command, &config, transport, MemoryStore::new()).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => fail(&e),
    }
}

fn fail(err: &CatalogError) -> ExitCode {
    log::error!("{}", err);
    eprintln!("{}", err.user_message());
    ExitCode::FAILURE
}

/// Run one command. Local failures (file writes, store removal) are logged and
/// reported through the exit code.
async fn run<S: KeyValueStore>(
    command: &Command,
    config: &CatalogConfig,
    transport: HttpTransport,
    store: S,
) -> Result<ExitCode, CatalogError> {
    let service = CatalogService::new(config, transport, store)?;

    match command {
        Command::List => {
            let records = service.get_catalog_list().await?;
            for record in &records {
                println!("{:>6}  {:<30} {}", record.local_id, record.name, record.id);
            }
            println!("{} cards", records.len());
            service.finish_refresh().await;
        }
        Command::Search { query } => {
            let (mut state, _events) = CatalogListState::new();
            state.refresh(&service).await?;
            state.search(query);

            let view = state.view();
            if let Some(message) = view.empty_message {
                println!("{}", message);
            }
            for record in view.records {
                println!("{:>6}  {:<30} {}", record.local_id, record.name, record.id);
            }
            service.finish_refresh().await;
        }
        Command::Show { id } => {
            let detail = service.get_item_detail(id).await?;
            print_detail(&ItemDetailView::new(&detail), &service);
        }
        Command::Image { id, quality, out } => {
            let quality = ImageQuality::from(*quality);
            let detail = service.get_item_detail(id).await?;
            let Some(blob) = service.image_for(detail.image.as_deref(), quality).await? else {
                println!("Card {} has no image", id);
                return Ok(ExitCode::SUCCESS);
            };

            let out = out.clone().unwrap_or_else(|| {
                PathBuf::from(format!("{}-{}.{}", id, quality.as_str(), config.image_extension))
            });
            if let Err(e) = write_image(&out, &blob) {
                log::error!("Failed to write {}: {}", out.display(), e);
                return Ok(ExitCode::FAILURE);
            }
            println!(
                "Saved {}x{} image to {}",
                blob.width,
                blob.height,
                out.display()
            );
        }
        Command::ClearCache => {
            if let Err(e) = service.clear_catalog_cache() {
                log::error!("Failed to clear card cache: {}", e);
                return Ok(ExitCode::FAILURE);
            }
            println!("Card cache cleared");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn write_image(path: &Path, blob: &ImageBlob) -> std::io::Result<()> {
    std::fs::write(path, &blob.bytes)
}

fn print_detail<T, S>(view: &ItemDetailView<'_>, service: &CatalogService<T, S>)
where
    T: tcg_catalog::Transport,
    S: KeyValueStore,
{
    println!("{}", view.card_name());
    if let Some(url) = view.image_url(service.endpoints()) {
        println!("  Image: {}", url);
    }
    println!("  {}", view.hp());
    println!("  {}", view.types());
    println!("  {}", view.stage());
    println!("  {}", view.evolve_from());
    println!("  {}", view.set_name());
    println!("  {}", view.rarity());
    println!("  {}", view.illustrator());
    println!();
    println!("  {}", view.description());

    let attacks = view.attacks();
    if !attacks.is_empty() {
        println!();
        println!("  Attacks:");
        for attack in attacks {
            println!(
                "    {} [{}] {}: {}",
                attack.name, attack.cost, attack.damage, attack.effect
            );
        }
    }

    let weaknesses = view.weaknesses();
    if !weaknesses.is_empty() {
        println!("  Weaknesses:");
        for weakness in weaknesses {
            println!("    {} {}", weakness.kind, weakness.value);
        }
    }

    println!();
    println!("  {}", view.retreat_cost());
    println!("  {}", view.regulation_mark());
    println!("  {}", view.legalities());
    println!("  {}", view.last_updated());
}
