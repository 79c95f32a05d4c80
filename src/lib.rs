mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db};

use auth::firebase::{FirebaseTokenVerifier, TokenVerifier};
use repositories::project::ProjectRepository;
use repositories::sqlx_repo::SqlxProjectRepo;
use use_cases::projects::ProjectHandler;

pub struct AppState<R = SqlxProjectRepo, V = FirebaseTokenVerifier>
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    pub project_handler: ProjectHandler<R, V>,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let project_repo = SqlxProjectRepo::new(pool);

        // Credential verification only comes up when the identity provider
        // is fully configured; tokens supplied without it are rejected.
        let verifier = config.firebase_credentials().and_then(|credentials| {
            FirebaseTokenVerifier::new(&credentials)
                .map_err(|e| tracing::error!("Identity provider initialization failed: {}", e))
                .ok()
        });

        if verifier.is_none() {
            tracing::warn!(
                "Identity provider not configured; bearer tokens will be rejected as unverifiable"
            );
        }

        let project_handler =
            ProjectHandler::new(project_repo, verifier, config.admin_email.clone());

        AppState { project_handler }
    }
}

impl<R, V> AppState<R, V>
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    /// Assembly with explicit dependencies, used by the integration tests
    /// to swap in an in-memory store and a stub verifier.
    pub fn with_parts(
        project_repo: R,
        verifier: Option<V>,
        admin_email: Option<String>,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo, verifier, admin_email),
        }
    }
}
