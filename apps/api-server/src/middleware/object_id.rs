//! Id-format check for routes carrying an `{id}` path segment.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};

use scribe_core::domain::PostId;

/// Middleware factory rejecting requests whose `{id}` is not a well-formed post id.
///
/// Must wrap a resource (not a scope) so the path is already matched.
/// Rejected requests get `400 Bad Request` with an empty body and never
/// reach the handler.
pub struct CheckObjectId;

impl<S, B> Transform<S, ServiceRequest> for CheckObjectId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CheckObjectIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CheckObjectIdService { service }))
    }
}

pub struct CheckObjectIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CheckObjectIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let valid = req.match_info().get("id").is_some_and(PostId::is_valid);

        if !valid {
            tracing::debug!(path = %req.path(), "Rejecting malformed post id");

            let (http_req, _payload) = req.into_parts();
            let response = ServiceResponse::new(http_req, HttpResponse::BadRequest().finish());
            return Box::pin(async move { Ok(response.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    async fn reached() -> HttpResponse {
        HttpResponse::Ok().body("reached")
    }

    #[actix_web::test]
    async fn test_valid_id_passes_through() {
        let app = test::init_service(App::new().service(
            web::resource("/things/{id}")
                .wrap(CheckObjectId)
                .route(web::get().to(reached)),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/things/507f1f77bcf86cd799439011")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"reached"));
    }

    #[actix_web::test]
    async fn test_malformed_id_is_rejected() {
        let app = test::init_service(App::new().service(
            web::resource("/things/{id}")
                .wrap(CheckObjectId)
                .route(web::get().to(reached)),
        ))
        .await;

        for id in ["123", "507f1f77bcf86cd79943901z", "507f1f77bcf86cd7994390111"] {
            let req = test::TestRequest::get()
                .uri(&format!("/things/{id}"))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), 400);

            let body = test::read_body(res).await;
            assert!(body.is_empty());
        }
    }
}
