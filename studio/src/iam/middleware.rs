// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::AUTHORIZATION;
use actix_web::web::Data;
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::future::{Ready, ready};
use std::rc::Rc;

use super::jwt::JwtService;
use super::types::User;

/// Caller identity as resolved by `JwtAuthMiddlewareFactory`.
pub trait AuthRequest {
    fn user_info(&self) -> Option<User>;
    fn is_authenticated(&self) -> bool;
}

impl AuthRequest for HttpRequest {
    fn user_info(&self) -> Option<User> {
        self.extensions().get::<User>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.user_info().is_some()
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn request_token(req: &ServiceRequest, jwt_service: &JwtService) -> Option<String> {
    bearer_token(req).or_else(|| {
        req.cookie(jwt_service.cookie_name())
            .map(|cookie| cookie.value().to_string())
    })
}

/// Resolves the caller from a bearer token or the auth cookie. Requests
/// without a valid token pass through anonymously.
pub struct JwtAuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match req.app_data::<Data<JwtService>>() {
            Some(jwt_service) => {
                if let Some(token) = request_token(&req, jwt_service) {
                    match jwt_service.verify_token(&token) {
                        Ok(claims) => {
                            req.extensions_mut().insert(User::from(claims));
                        }
                        Err(e) => log::debug!("Ignoring invalid token on {}: {}", req.path(), e),
                    }
                }
            }
            None => log::error!("JWT service missing from app data; treating caller as anonymous"),
        }

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}

/// Middleware that rejects anonymous callers with 401 JSON
pub struct RequireLoginMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequireLoginMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddlewareService { service }))
    }
}

pub struct RequireLoginMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !req.request().is_authenticated() {
            log::debug!("Anonymous request to {} rejected", req.path());
            let (req, _) = req.into_parts();
            let response = HttpResponse::Unauthorized()
                .json(json!({
                    "error": "unauthenticated",
                    "message": "Login required",
                }))
                .map_into_right_body();
            return Box::pin(async move { Ok(ServiceResponse::new(req, response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
