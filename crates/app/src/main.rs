//! Stockroom - Main Entry Point
//!
//! Command line front end for the inventory dashboard. Every invocation
//! restores the stored session before running its command.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use stockroom_application::{
    ApplicationError, CatalogEdit, DownloadReport, DownloadReportInput, EditCatalog,
    EditCatalogOutcome, GatewayError, LoadAnalytics, LoadAnalyticsInput, LoadAnalyticsOutput,
    LoadCatalog, LoadCatalogInput, LoadCatalogOutput, Router, SectionFailure, SessionCredentials,
    SessionStore, SimulateOrder,
};
use stockroom_domain::{
    AppRoute, ClientSettings, DomainError, Navigation, OrderDraft, ProductDraft, ReportFormat,
    ReportKind, ReportRequest, Session, SupplierDraft,
};
use stockroom_infrastructure::{
    FileTokenStorage, ReqwestApiClient, SettingsError, SettingsRepository, apply_env_overrides,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Store = SessionStore<ReqwestApiClient, FileTokenStorage>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("settings: {0}")]
    InvalidSettings(#[from] DomainError),
    #[error("{0}")]
    Gateway(#[from] GatewayError),
    #[error("{0}")]
    Application(#[from] ApplicationError),
    #[error("could not determine where to keep the session token; pass --storage")]
    NoStorageLocation,
    #[error("not logged in; run `stockroom login <username>` first")]
    NotLoggedIn,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Inventory dashboard client")]
struct Cli {
    /// Base URL of the inventory API.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Token storage file.
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session.
    Login {
        username: String,
        #[arg(long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not log in.
    Signup {
        username: String,
        email: String,
        #[arg(long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Show where navigating to a dashboard path would land.
    Open { path: String },
    /// List products.
    Products,
    /// List suppliers.
    Suppliers,
    /// List purchase orders.
    Orders,
    /// Add, change or remove a product.
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Add, change or remove a supplier.
    Supplier {
        #[command(subcommand)]
        action: SupplierAction,
    },
    /// Place a purchase order.
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Show the dashboard figures.
    Dashboard,
    /// Show the ABC classification of the catalog.
    Abc,
    /// Show the demand forecast for a product.
    Forecast { product_id: i64 },
    /// Generate a random order and show the refreshed dashboard.
    Simulate,
    /// Download a report.
    Report {
        kind: ReportKind,
        format: ReportFormat,
        /// Directory to save into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ProductAction {
    /// Add a product.
    Add(ProductFields),
    /// Replace a product's fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Remove a product.
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct ProductFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    price: f64,
    /// Units on hand.
    #[arg(long)]
    stock: i64,
    #[arg(long)]
    reorder_point: i64,
    #[arg(long)]
    supplier_id: i64,
}

impl From<ProductFields> for ProductDraft {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            category: fields.category,
            price: fields.price,
            stock_level: fields.stock,
            reorder_point: fields.reorder_point,
            supplier_id: fields.supplier_id,
        }
    }
}

#[derive(Subcommand, Debug)]
enum SupplierAction {
    /// Add a supplier.
    Add(SupplierFields),
    /// Replace a supplier's fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: SupplierFields,
    },
    /// Remove a supplier.
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct SupplierFields {
    #[arg(long)]
    name: String,
    /// Contact person.
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// Delivery reliability between 0 and 1.
    #[arg(long)]
    reliability: Option<f64>,
}

impl From<SupplierFields> for SupplierDraft {
    fn from(fields: SupplierFields) -> Self {
        Self {
            name: fields.name,
            contact_name: fields.contact,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
            reliability_score: fields.reliability,
        }
    }
}

#[derive(Subcommand, Debug)]
enum OrderAction {
    /// Place an order.
    Add {
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        supplier_id: i64,
        #[arg(long)]
        quantity: i64,
        #[arg(long, default_value = "Pending")]
        status: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(&cli).await?;
    let storage_path = cli
        .storage
        .clone()
        .or_else(|| settings.storage_path.clone())
        .or_else(FileTokenStorage::default_path)
        .ok_or(CliError::NoStorageLocation)?;

    let credentials = Arc::new(SessionCredentials::new());
    let client = Arc::new(ReqwestApiClient::new(&settings, credentials.clone())?);
    let storage = Arc::new(FileTokenStorage::at(storage_path));
    let store = SessionStore::new(client.clone(), storage, credentials)
        .with_policy(settings.verification_policy);

    store.initialize().await;

    match cli.command {
        Command::Login { username, password } => {
            let user = store.login(&username, &password).await?;
            println!("Logged in as {}", user.username().unwrap_or(&username));
        }
        Command::Signup {
            username,
            email,
            password,
        } => {
            store.signup(&username, &email, &password).await?;
            println!("Account created for {username}. Log in to continue.");
        }
        Command::Logout => {
            store.logout();
            println!("Logged out");
        }
        Command::Whoami => whoami(&store.snapshot())?,
        Command::Open { path } => {
            let outcome = Router::new().navigate(&path, &store.snapshot());
            println!("{}", render::navigation(outcome));
        }
        Command::Products => {
            let output = catalog(&store, client, AppRoute::Products).await?;
            render::products(&output.products);
        }
        Command::Suppliers => {
            let output = catalog(&store, client, AppRoute::Suppliers).await?;
            render::suppliers(&output.suppliers);
        }
        Command::Orders => {
            let output = catalog(&store, client, AppRoute::Orders).await?;
            render::orders(&output.orders);
        }
        Command::Product { action } => {
            let edit = match action {
                ProductAction::Add(fields) => CatalogEdit::CreateProduct(fields.into()),
                ProductAction::Update { id, fields } => CatalogEdit::UpdateProduct {
                    id,
                    draft: fields.into(),
                },
                ProductAction::Delete { id } => CatalogEdit::DeleteProduct(id),
            };
            edit_catalog(&store, client, edit).await?;
        }
        Command::Supplier { action } => {
            let edit = match action {
                SupplierAction::Add(fields) => CatalogEdit::CreateSupplier(fields.into()),
                SupplierAction::Update { id, fields } => CatalogEdit::UpdateSupplier {
                    id,
                    draft: fields.into(),
                },
                SupplierAction::Delete { id } => CatalogEdit::DeleteSupplier(id),
            };
            edit_catalog(&store, client, edit).await?;
        }
        Command::Order {
            action:
                OrderAction::Add {
                    product_id,
                    supplier_id,
                    quantity,
                    status,
                },
        } => {
            let draft = OrderDraft {
                status,
                ..OrderDraft::new(product_id, supplier_id, quantity)
            };
            edit_catalog(&store, client, CatalogEdit::CreateOrder(draft)).await?;
        }
        Command::Dashboard => {
            let input = LoadAnalyticsInput {
                stats: true,
                ..LoadAnalyticsInput::default()
            };
            let output = analytics(&store, client, AppRoute::Dashboard, input).await?;
            if let Some(stats) = &output.stats {
                render::stats(stats);
            }
        }
        Command::Abc => {
            let input = LoadAnalyticsInput {
                abc: true,
                ..LoadAnalyticsInput::default()
            };
            let output = analytics(&store, client, AppRoute::Analytics, input).await?;
            render::abc(&output.abc);
        }
        Command::Forecast { product_id } => {
            let input = LoadAnalyticsInput {
                forecast: Some(product_id),
                ..LoadAnalyticsInput::default()
            };
            let output = analytics(&store, client, AppRoute::Analytics, input).await?;
            if let Some(forecast) = &output.forecast {
                render::forecast(forecast);
            }
        }
        Command::Simulate => {
            require(AppRoute::Dashboard, &store.snapshot())?;
            let output = SimulateOrder::new(client).execute().await;
            if let Some(order) = &output.order {
                println!("{}", render::simulation(order));
            }
            if let Some(stats) = &output.stats {
                render::stats(stats);
            }
            surface(output.failures)?;
        }
        Command::Report { kind, format, out } => {
            require(kind.route(), &store.snapshot())?;
            let path = DownloadReport::new(client)
                .execute(DownloadReportInput {
                    request: ReportRequest::new(kind, format),
                    target_dir: out,
                })
                .await?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

/// Settings file, then `STOCKROOM_*` variables, then flags.
async fn load_settings(cli: &Cli) -> Result<ClientSettings, CliError> {
    let repository = cli
        .config
        .as_ref()
        .map_or_else(SettingsRepository::new, SettingsRepository::at);

    let mut settings = apply_env_overrides(repository.load().await?, |key| {
        std::env::var(key).ok()
    })?;

    if let Some(url) = &cli.api_url {
        settings.api_base_url.clone_from(url);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.timeout_ms = timeout_ms;
    }
    settings.validate()?;
    tracing::debug!(
        api = %settings.api_base_url,
        timeout_ms = settings.timeout_ms,
        "settings loaded"
    );
    Ok(settings)
}

/// Routes a data command through the guard, like opening its screen.
fn require(route: AppRoute, session: &Session) -> Result<(), CliError> {
    match Router::new().navigate(route.path(), session) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(_) | Navigation::Wait => Err(CliError::NotLoggedIn),
    }
}

/// Turns the first failed section into an error exit.
fn surface(failures: Vec<SectionFailure>) -> Result<(), CliError> {
    match failures.into_iter().next() {
        Some((_, error)) => Err(error.into()),
        None => Ok(()),
    }
}

async fn catalog(
    store: &Store,
    client: Arc<ReqwestApiClient>,
    route: AppRoute,
) -> Result<LoadCatalogOutput, CliError> {
    require(route, &store.snapshot())?;

    let input = LoadCatalogInput {
        products: route == AppRoute::Products,
        suppliers: route == AppRoute::Suppliers,
        orders: route == AppRoute::Orders,
    };
    let mut output = LoadCatalog::new(client).execute(input).await;
    surface(std::mem::take(&mut output.failures))?;
    Ok(output)
}

async fn analytics(
    store: &Store,
    client: Arc<ReqwestApiClient>,
    route: AppRoute,
    input: LoadAnalyticsInput,
) -> Result<LoadAnalyticsOutput, CliError> {
    require(route, &store.snapshot())?;

    let mut output = LoadAnalytics::new(client).execute(input).await;
    surface(std::mem::take(&mut output.failures))?;
    Ok(output)
}

/// Applies a catalog change from the screen that offers it.
async fn edit_catalog(
    store: &Store,
    client: Arc<ReqwestApiClient>,
    edit: CatalogEdit,
) -> Result<(), CliError> {
    require(edit.route(), &store.snapshot())?;

    match EditCatalog::new(client).execute(edit).await {
        EditCatalogOutcome::Saved(record) => println!("Saved {}", render::record(&record)),
        EditCatalogOutcome::Deleted { section, id } => println!("Deleted {id} from {section}"),
        EditCatalogOutcome::Failed(error) => return Err(error.into()),
    }
    Ok(())
}

fn whoami(session: &Session) -> Result<(), CliError> {
    let Some(user) = &session.user else {
        return Err(CliError::NotLoggedIn);
    };
    println!("{}", serde_json::to_string_pretty(user.as_value())?);
    Ok(())
}
