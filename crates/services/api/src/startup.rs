use actix_files::Files;
use actix_web::{dev::Server, guard, web, App, HttpServer};
use actix_web_lab::middleware::from_fn;
use lib_config::config::configuration::Settings;
use lib_config::db::db::PgPool;
use middleware::jwt::{jwt_auth_middleware, require_admin, require_game_adder};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::routes::{
    announcements::crud::{create_announcement, get_active_announcement, update_announcement},
    auth::crud::{login_user, me, register_user},
    chat::crud::{list_chat_messages, send_chat_message},
    comments::crud::{create_comment, delete_comment, list_comments, toggle_comment_like},
    favorites::crud::{list_favorites, toggle_favorite},
    games::crud::{create_game, delete_game, get_game, list_games, update_game},
    health_check::health_check,
    ratings::crud::{list_ratings, submit_rating},
    requests::crud::{create_request, list_requests, update_request_status},
    stats::crud::get_stats,
    support::crud::{
        create_ticket, create_ticket_message, list_ticket_messages, list_tickets,
        update_ticket_status,
    },
    uploads::crud::upload_image,
    users::crud::{get_users, update_user_profile, update_user_role},
};

/**************************************************************/
// Application State re reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(pool: PgPool, config: Settings) -> Result<Self, std::io::Error> {
        let listener = if config.service.port == 0 {
            TcpListener::bind(format!("{}:0", config.service.host))?
        } else {
            let address = format!("{}:{}", config.service.host, config.service.port);
            TcpListener::bind(&address)?
        };

        let actual_port = listener.local_addr()?.port();
        let server = run_server(listener, pool, config).await?;
        Ok(Self {
            port: actual_port,
            server,
        })
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/******************************************/
// Running Server
/******************************************/
// Mixed-access paths (e.g. GET /api/games public, POST /api/games gated) are
// split into a Get-guarded public scope followed by a protected scope; a
// failed scope guard falls through to the next registered scope.
pub async fn run_server(
    listener: TcpListener,
    pool: PgPool,
    config: Settings,
) -> Result<Server, std::io::Error> {
    let uploads_dir = config.uploads.dir.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .route("/health_check", web::get().to(health_check))
            .service(Files::new("/uploads", uploads_dir.clone()))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(register_user))
                            .route("/login", web::post().to(login_user))
                            .service(
                                web::resource("/me")
                                    .wrap(from_fn(jwt_auth_middleware))
                                    .route(web::get().to(me)),
                            ),
                    )
                    .service(
                        web::scope("/users")
                            .wrap(from_fn(jwt_auth_middleware))
                            .service(
                                web::resource("")
                                    .wrap(from_fn(require_admin))
                                    .route(web::get().to(get_users)),
                            )
                            .service(
                                web::resource("/{user_id}/role")
                                    .wrap(from_fn(require_admin))
                                    .route(web::patch().to(update_user_role)),
                            )
                            .route("/{user_id}/profile", web::patch().to(update_user_profile)),
                    )
                    .service(
                        web::scope("/games")
                            .guard(guard::Get())
                            .route("", web::get().to(list_games))
                            .route("/{game_id}", web::get().to(get_game)),
                    )
                    .service(
                        web::scope("/games")
                            .wrap(from_fn(jwt_auth_middleware))
                            .service(
                                web::resource("")
                                    .wrap(from_fn(require_game_adder))
                                    .route(web::post().to(create_game)),
                            )
                            .service(
                                web::resource("/{game_id}")
                                    .wrap(from_fn(require_admin))
                                    .route(web::patch().to(update_game))
                                    .route(web::delete().to(delete_game)),
                            ),
                    )
                    .service(
                        web::scope("/uploads")
                            .wrap(from_fn(jwt_auth_middleware))
                            .service(
                                web::resource("")
                                    .wrap(from_fn(require_game_adder))
                                    .route(web::post().to(upload_image)),
                            ),
                    )
                    .service(
                        web::scope("/comments")
                            .guard(guard::Get())
                            .route("/{game_id}", web::get().to(list_comments)),
                    )
                    .service(
                        web::scope("/comments")
                            .wrap(from_fn(jwt_auth_middleware))
                            .route("", web::post().to(create_comment))
                            .route("/{comment_id}", web::delete().to(delete_comment))
                            .route("/{comment_id}/like", web::post().to(toggle_comment_like)),
                    )
                    .service(
                        web::scope("/requests")
                            .wrap(from_fn(jwt_auth_middleware))
                            .route("", web::get().to(list_requests))
                            .route("", web::post().to(create_request))
                            .service(
                                web::resource("/{request_id}")
                                    .wrap(from_fn(require_admin))
                                    .route(web::patch().to(update_request_status)),
                            ),
                    )
                    .service(
                        web::scope("/favorites")
                            .wrap(from_fn(jwt_auth_middleware))
                            .route("", web::post().to(toggle_favorite))
                            .route("/{user_id}", web::get().to(list_favorites)),
                    )
                    .service(
                        web::scope("/ratings")
                            .guard(guard::Get())
                            .route("/{game_id}", web::get().to(list_ratings)),
                    )
                    .service(
                        web::scope("/ratings")
                            .wrap(from_fn(jwt_auth_middleware))
                            .route("", web::post().to(submit_rating)),
                    )
                    .route("/stats", web::get().to(get_stats))
                    .service(
                        web::scope("/announcements")
                            .guard(guard::Get())
                            .route("/active", web::get().to(get_active_announcement)),
                    )
                    .service(
                        web::scope("/announcements")
                            .wrap(from_fn(jwt_auth_middleware))
                            .service(
                                web::resource("")
                                    .wrap(from_fn(require_admin))
                                    .route(web::post().to(create_announcement)),
                            )
                            .service(
                                web::resource("/{announcement_id}")
                                    .wrap(from_fn(require_admin))
                                    .route(web::patch().to(update_announcement)),
                            ),
                    )
                    .service(
                        web::scope("/chat")
                            .wrap(from_fn(jwt_auth_middleware))
                            .route("/global", web::get().to(list_chat_messages))
                            .route("/global", web::post().to(send_chat_message)),
                    )
                    .service(
                        web::scope("/support")
                            .wrap(from_fn(jwt_auth_middleware))
                            .route("", web::get().to(list_tickets))
                            .route("", web::post().to(create_ticket))
                            .service(
                                web::resource("/{ticket_id}/status")
                                    .wrap(from_fn(require_admin))
                                    .route(web::patch().to(update_ticket_status)),
                            )
                            .route("/{ticket_id}/messages", web::get().to(list_ticket_messages))
                            .route(
                                "/{ticket_id}/messages",
                                web::post().to(create_ticket_message),
                            ),
                    ),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
