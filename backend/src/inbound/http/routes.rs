//! Route table for the inventory application.
//!
//! Health probes are registered by the server next to their own state and
//! are not part of this table.

use actix_web::web;

use super::{auth, categories, demo_users, imports, mirrors, products};

/// Register product routes below `prefix`. The create form lives at
/// `nuevo` on the primary surface and at `crear` under `/mysql/productos`.
fn product_routes(cfg: &mut web::ServiceConfig, list_path: &str, prefix: &str, create_segment: &str) {
    cfg.route(list_path, web::get().to(products::list_products))
        .service(
            web::resource(format!("{prefix}/{create_segment}"))
                .route(web::get().to(products::new_product_form))
                .route(web::post().to(products::create_product)),
        )
        .service(
            web::resource(format!("{prefix}/editar/{{id}}"))
                .route(web::get().to(products::edit_product_form))
                .route(web::post().to(products::update_product)),
        )
        .route(
            &format!("{prefix}/eliminar/{{id}}"),
            web::post().to(products::delete_product),
        );
}

fn category_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/mysql/categorias")
            .route("", web::get().to(categories::list_categories))
            .service(
                web::resource("/crear")
                    .route(web::get().to(categories::new_category_form))
                    .route(web::post().to(categories::create_category)),
            )
            .service(
                web::resource("/editar/{id}")
                    .route(web::get().to(categories::edit_category_form))
                    .route(web::post().to(categories::update_category)),
            )
            .route("/eliminar/{id}", web::post().to(categories::delete_category)),
    );
}

fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/register")
                    .route(web::get().to(auth::register_form))
                    .route(web::post().to(auth::register)),
            )
            .service(
                web::resource("/login")
                    .route(web::get().to(auth::login_form))
                    .route(web::post().to(auth::login)),
            )
            .route("/logout", web::get().to(auth::logout))
            .route("/me", web::get().to(auth::current_user)),
    );
}

/// Register every application route.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use inventory_backend::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    auth_routes(cfg);
    category_routes(cfg);
    product_routes(cfg, "/mysql/productos", "/mysql/productos", "crear");
    product_routes(cfg, "/", "", "nuevo");
    cfg.route("/buscar", web::get().to(products::search_products))
        .route("/import/{target}", web::get().to(imports::run_import))
        .route("/usuarios/crear", web::get().to(demo_users::create_demo_user))
        .route("/usuarios/listar", web::get().to(demo_users::list_demo_users))
        .route("/{format}/guardar", web::get().to(mirrors::save_record))
        .route("/{format}/ver", web::get().to(mirrors::view_records));
}
