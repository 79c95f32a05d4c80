use crate::{
    auth::firebase::{TokenVerifier, VerifiedIdentity},
    entities::project::{NewProjectRequest, Project, ProjectInsert},
    errors::AppError,
    repositories::project::ProjectRepository,
};

pub struct ProjectHandler<R, V>
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    pub project_repo: R,
    verifier: Option<V>,
    admin_email: Option<String>,
}

impl<R, V> ProjectHandler<R, V>
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    /// `verifier` is `None` when the identity provider is not configured;
    /// any bearer token supplied in that state is rejected as unauthorized.
    pub fn new(project_repo: R, verifier: Option<V>, admin_email: Option<String>) -> Self {
        ProjectHandler {
            project_repo,
            verifier,
            admin_email,
        }
    }

    /// Validates, authorizes, then persists. Validation runs before the
    /// bearer token is even looked at, so a bad payload is always a 400
    /// regardless of credentials.
    pub async fn create_project(
        &self,
        request: NewProjectRequest,
        bearer: Option<&str>,
    ) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;

        self.authorize(bearer).await?;

        self.project_repo.create_project(&insert).await
    }

    /// All projects, newest first.
    pub async fn get_all_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.get_all_projects().await
    }

    /// Requests without a bearer token pass through as anonymous: the site
    /// only attaches a token when an admin is signed in. Hardening this to
    /// require a token unconditionally is an owner decision, not ours.
    async fn authorize(&self, bearer: Option<&str>) -> Result<Option<VerifiedIdentity>, AppError> {
        let Some(token) = bearer else {
            return Ok(None);
        };

        // Fail closed: a token supplied while the verifier is unconfigured
        // is unverifiable, never silently accepted.
        let Some(verifier) = &self.verifier else {
            tracing::warn!("bearer token supplied but identity provider is not configured");
            return Err(AppError::UnauthorizedAccess);
        };

        let identity = verifier.verify(token).await?;

        if let Some(admin_email) = &self.admin_email {
            if identity.email.as_deref() != Some(admin_email.as_str()) {
                tracing::warn!(uid = %identity.uid, "verified identity is not the admin");
                return Err(AppError::ForbiddenAccess);
            }
        }

        Ok(Some(identity))
    }
}
