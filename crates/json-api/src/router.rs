//! App Router

use salvo::Router;

use crate::{auth, sweets};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler)),
        )
        .push(
            Router::new().hoop(auth::middleware::handler).push(
                Router::with_path("sweets")
                    .get(sweets::handlers::index::handler)
                    .post(sweets::handlers::create::handler)
                    .push(
                        Router::with_path("{uuid}")
                            .get(sweets::handlers::get::handler)
                            .put(sweets::handlers::update::handler)
                            .delete(sweets::handlers::delete::handler)
                            .push(
                                Router::with_path("purchase")
                                    .post(sweets::handlers::purchase::handler),
                            )
                            .push(
                                Router::with_path("restock")
                                    .post(sweets::handlers::restock::handler),
                            ),
                    ),
            ),
        )
}
