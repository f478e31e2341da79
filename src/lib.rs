use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod documents;
pub mod entities;
pub mod error;
pub mod registry;
pub mod routes;
pub mod store;
pub mod submission;
pub mod widgets;

use crate::config::Config;
use crate::documents::DocumentLibrary;
use crate::entities::Entity;
use crate::registry::WidgetRegistry;
use crate::routes::{accounts, documents as document_routes, manifest, salesforce};
use crate::store::CsvStore;

/// Shared state for the widget/config backend.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<WidgetRegistry>,
    /// Directory holding the entity CSV files
    pub data_dir: PathBuf,
    pub apps_file: PathBuf,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(
        registry: WidgetRegistry,
        data_dir: impl Into<PathBuf>,
        apps_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            data_dir: data_dir.into(),
            apps_file: apps_file.into(),
            cors_origins: Config::default().cors_origins,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            registry: Arc::new(widgets::default_registry()),
            data_dir: config.data_dir.clone(),
            apps_file: config.apps_file.clone(),
            cors_origins: config.cors_origins.clone(),
        }
    }

    pub fn store(&self, entity: Entity) -> CsvStore {
        CsvStore::new(&self.data_dir, entity)
    }
}

/// Shared state for the document backend.
#[derive(Clone)]
pub struct DocumentState {
    pub library: DocumentLibrary,
    pub widgets_file: PathBuf,
    pub apps_file: PathBuf,
}

impl DocumentState {
    pub fn new(
        documents_dir: impl Into<PathBuf>,
        widgets_file: impl Into<PathBuf>,
        apps_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            library: DocumentLibrary::new(documents_dir),
            widgets_file: widgets_file.into(),
            apps_file: apps_file.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.documents_dir.clone(),
            config.widgets_file.clone(),
            config.apps_file.clone(),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SFS Widget Backend",
        version = "0.1.0",
        description = "Widget configuration and CSV-backed deal, tranche, asset and account records"
    ),
    paths(
        manifest::get_widgets,
        manifest::get_apps,
        salesforce::list_deals,
        salesforce::submit_deal,
        salesforce::list_tranches,
        salesforce::submit_tranche,
        salesforce::list_realestate,
        salesforce::submit_realestate,
        salesforce::list_accounts,
        salesforce::submit_account,
        salesforce::get_hub,
        accounts::list_account_options,
        accounts::lookup_accounts
    ),
    components(schemas(
        routes::SubmitResponse,
        routes::OptionItem,
        accounts::AccountLookupQuery
    ))
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SFS Document Backend",
        version = "0.1.0",
        description = "Deal folders and base64-encoded PDF documents"
    ),
    paths(
        manifest::get_document_widgets,
        manifest::get_document_apps,
        document_routes::list_deals,
        document_routes::list_folders,
        document_routes::list_files,
        document_routes::get_document
    ),
    components(schemas(
        routes::OptionItem,
        document_routes::DocumentResponse,
        document_routes::DataFormat
    ))
)]
struct DocumentApiDoc;

/// Allow-list CORS with credentials; a `*` entry opens it to any origin without credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Create the widget/config backend with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    let api_routes = Router::new()
        .route("/widgets.json", get(manifest::get_widgets))
        .route("/apps.json", get(manifest::get_apps))
        .route(
            "/salesforce/deals",
            get(salesforce::list_deals).post(salesforce::submit_deal),
        )
        .route(
            "/salesforce/tranches",
            get(salesforce::list_tranches).post(salesforce::submit_tranche),
        )
        .route(
            "/salesforce/realestate",
            get(salesforce::list_realestate).post(salesforce::submit_realestate),
        )
        .route(
            "/salesforce/accounts",
            get(salesforce::list_accounts).post(salesforce::submit_account),
        )
        .route("/salesforce/accounts/list", get(accounts::list_account_options))
        .route("/salesforce/accounts/lookup", get(accounts::lookup_accounts))
        .route("/salesforce/hub", get(salesforce::get_hub))
        .with_state(state);

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(docs_router)
        .layer(cors)
}

/// Create the document backend with all routes and middleware
pub fn create_document_app(state: DocumentState) -> Router {
    let api_routes = Router::new()
        .route("/widgets.json", get(manifest::get_document_widgets))
        .route("/apps.json", get(manifest::get_document_apps))
        .route("/deals", get(document_routes::list_deals))
        .route("/folders", get(document_routes::list_folders))
        .route("/files_list", get(document_routes::list_files))
        .route("/documents", get(document_routes::get_document))
        .with_state(state);

    let docs_router =
        SwaggerUi::new("/docs").url("/api-doc/openapi.json", DocumentApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(docs_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
