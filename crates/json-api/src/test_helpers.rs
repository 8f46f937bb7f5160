//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use sweetshop_app::{
    auth::{AuthenticatedUser, MockAuthService, UserRecord, UserRole, UserUuid},
    context::AppContext,
    domain::sweets::MockSweetsService,
};

use crate::{extensions::*, state::State};

pub(crate) fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: UserUuid::new(),
        username: "tester".to_string(),
        role: UserRole::Customer,
    }
}

pub(crate) fn test_user_record(username: &str) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        role: UserRole::Customer,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_sweets_mock() -> MockSweetsService {
    let mut sweets = MockSweetsService::new();

    sweets.expect_list_sweets().never();
    sweets.expect_get_sweet().never();
    sweets.expect_create_sweet().never();
    sweets.expect_update_sweet().never();
    sweets.expect_delete_sweet().never();
    sweets.expect_purchase_sweet().never();
    sweets.expect_restock_sweet().never();

    sweets
}

pub(crate) fn state_with_sweets(sweets: MockSweetsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        sweets: Arc::new(sweets),
        auth: Arc::new(strict_auth_mock()),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        sweets: Arc::new(strict_sweets_mock()),
        auth: Arc::new(auth),
    }))
}

/// Service for testing an authenticated sweets route with a pre-injected user.
pub(crate) fn sweets_service(sweets: MockSweetsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_sweets(sweets)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Service for testing a public auth route.
pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .push(route),
    )
}
