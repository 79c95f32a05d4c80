use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    auth::firebase::TokenVerifier,
    entities::project::NewProjectRequest,
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::extractors::MaybeBearer,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_projects<R, V>(
    state: web::Data<AppState<R, V>>,
) -> Result<impl Responder, AppError>
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    let projects = state.project_handler.get_all_projects().await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, data, bearer))]
pub async fn create_project<R, V>(
    state: web::Data<AppState<R, V>>,
    data: web::Json<NewProjectRequest>,
    bearer: MaybeBearer,
) -> Result<impl Responder, AppError>
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    let project = state
        .project_handler
        .create_project(data.into_inner(), bearer.token())
        .await?;

    Ok(HttpResponse::Created().json(project))
}
