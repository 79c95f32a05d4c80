use actix_web::web;

use crate::{
    auth::firebase::TokenVerifier,
    handlers::{home::home, system::health_check},
    repositories::project::ProjectRepository,
};

mod json_error;
mod projects;

pub fn configure_routes<R, V>(cfg: &mut web::ServiceConfig)
where
    R: ProjectRepository + 'static,
    V: TokenVerifier + 'static,
{
    cfg.service(home);
    cfg.route("/health", web::get().to(health_check::<R, V>));

    cfg.service(web::scope("/api").configure(projects::config_routes::<R, V>));

    cfg.configure(json_error::config_routes);
}
