//! Authorization middleware
//!
//! 在路由层执行 actor 解析与管理员门控。身份认证本身由外部身份源
//! 完成，这里只消费 `X-Actor-Id` 头。

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentActor;
use crate::utils::{AppError, ErrorCode};

/// Resolve the actor for every API request.
///
/// Used with `middleware::from_fn_with_state`; the [`CurrentActor`]
/// extractor argument performs the directory lookup and caches the actor
/// in request extensions for handlers.
pub async fn require_actor(
    actor: CurrentActor,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}

/// Management routes: admin role only
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let actor = req
        .extensions()
        .get::<CurrentActor>()
        .ok_or_else(AppError::unauthenticated)?;

    if !actor.is_admin() {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}
