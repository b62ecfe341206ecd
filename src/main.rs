mod cli;

use clap::Parser;
use cli::{Args, Command};
use jar_hell::adapters::inbound::ExploreSession;
use jar_hell::adapters::outbound::console::StderrProgressReporter;
use jar_hell::adapters::outbound::filesystem::JsonFileRecentlyViewedStore;
use jar_hell::adapters::outbound::network::{CachingPackageRepository, JarHellClient};
use jar_hell::application::dto::Route;
use jar_hell::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use jar_hell::application::read_models::{ReadModelBuilder, ViewModel};
use jar_hell::application::use_cases::{
    BrowseHomeUseCase, ExploreTreeUseCase, LoadPackagePageUseCase, OpenPageUseCase, Page,
    SearchPackagesUseCase, TrackRecentlyViewedUseCase,
};
use jar_hell::config::{self, Overrides, Settings};
use jar_hell::inspection::domain::{Coordinate, Gav};
use jar_hell::inspection::services::DependencyTree;
use jar_hell::shared::error::ExitCode;
use jar_hell::shared::Result;
use std::io::IsTerminal;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repository = Arc<CachingPackageRepository<JarHellClient>>;
type Reporter = Arc<StderrProgressReporter>;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::from_error(&e).as_i32());
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    let depth_override = match &args.command {
        Command::Show { depth, .. } | Command::Tree { depth, .. } => *depth,
        _ => None,
    };
    let settings = Settings::resolve(
        Overrides {
            server_url: args.server.clone(),
            format: args.format,
            tree_depth: depth_override,
            state_file: args.state_file.clone(),
        },
        config_file,
    )?;
    tracing::debug!(?settings, "resolved settings");

    let color = !args.no_color && args.output.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(settings.format, color);

    // Create adapters (Dependency Injection)
    let client = JarHellClient::new(&settings.server_url, settings.timeout)?;
    let repository: Repository = Arc::new(CachingPackageRepository::new(client));
    let reporter: Reporter = Arc::new(StderrProgressReporter::new());
    let store = Arc::new(JsonFileRecentlyViewedStore::new(settings.state_file.clone()));

    let open_page = OpenPageUseCase::new(repository.clone(), reporter.clone(), store.clone());
    let explorer = ExploreTreeUseCase::new(repository.clone(), reporter.clone())
        .with_max_concurrent(settings.max_concurrent_requests);

    let view = match args.command {
        Command::Search { query } => {
            let hits = SearchPackagesUseCase::new(repository).execute(&query).await;
            ViewModel::Search(ReadModelBuilder::search(&query, &hits))
        }
        Command::Versions { coordinate } => {
            let coordinate: Coordinate = coordinate.parse()?;
            let page = LoadPackagePageUseCase::new(repository)
                .execute(&coordinate)
                .await?;
            let selected = coordinate.gav().map(|gav| gav.version.as_str());
            ViewModel::Versions(ReadModelBuilder::versions(&page, selected))
        }
        Command::Show { gav, .. } => {
            let gav: Gav = gav.parse()?;
            let page = open_page.open_coordinate(&Coordinate::Package(gav)).await?;
            let tree = expand_tree(&explorer, &page, settings.tree_depth).await?;
            ReadModelBuilder::page(&page, tree.as_ref())
        }
        Command::Tree { gav, .. } => {
            let gav: Gav = gav.parse()?;
            let page = open_page.open_coordinate(&Coordinate::Package(gav)).await?;
            match expand_tree(&explorer, &page, settings.tree_depth).await? {
                Some(tree) => ViewModel::Tree(ReadModelBuilder::tree(&tree)),
                None => ReadModelBuilder::page(&page, None),
            }
        }
        Command::Open { route } => {
            let route = Route::parse(&route)?;
            let page = open_page.execute(&route).await?;
            let tree = expand_tree(&explorer, &page, settings.tree_depth).await?;
            ReadModelBuilder::page(&page, tree.as_ref())
        }
        Command::Explore { gav } => {
            let gav: Gav = gav.parse()?;
            let session = ExploreSession::new(open_page, explorer, formatter);
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            return session
                .run(&Route::Package(Coordinate::Package(gav)), input, tokio::io::stdout())
                .await;
        }
        Command::Recent => {
            let log = TrackRecentlyViewedUseCase::new(store).list()?;
            ViewModel::Recent(ReadModelBuilder::recent(&log))
        }
        Command::Latest => {
            let latest = BrowseHomeUseCase::new(repository, store).latest().await?;
            ViewModel::Latest(ReadModelBuilder::latest(&latest))
        }
        Command::Count => {
            let count = BrowseHomeUseCase::new(repository, store).count().await?;
            ViewModel::Count(ReadModelBuilder::count(count))
        }
    };

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatter.format(&view)?)?;
    Ok(())
}

/// Builds the tree of a package page and expands it `depth` levels
async fn expand_tree(
    explorer: &ExploreTreeUseCase<Repository, Reporter>,
    page: &Page,
    depth: usize,
) -> Result<Option<DependencyTree>> {
    let Page::Package { package, .. } = page else {
        return Ok(None);
    };
    let mut tree = DependencyTree::new(package.clone());
    let summary = explorer.expand_to_depth(&mut tree, depth).await?;
    tracing::debug!(?summary, "expanded dependency tree");
    Ok(Some(tree))
}
