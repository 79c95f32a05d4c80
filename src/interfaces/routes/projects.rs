use actix_web::web;

use crate::{
    auth::firebase::TokenVerifier,
    handlers::projects::{create_project, get_all_projects},
    repositories::project::ProjectRepository,
};

pub fn config_routes<R, V>(cfg: &mut web::ServiceConfig)
where
    R: ProjectRepository + 'static,
    V: TokenVerifier + 'static,
{
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(get_all_projects::<R, V>))
            .route(web::post().to(create_project::<R, V>)),
    );
}
