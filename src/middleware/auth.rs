use crate::{
    error::{AppError, AppResult},
    models::{Member, MemberRole},
    utils::jwt::TokenService,
};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};
use sea_orm::{DatabaseConnection, EntityTrait};

/// The authenticated caller, passed explicitly into every service call that needs one.
/// `role` is read from the member row, not trusted from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub member_id: i32,
    pub role: MemberRole,
}

/// Caller that may or may not be signed in.
#[derive(Debug, Clone, Copy)]
pub struct MaybePrincipal(pub Option<Principal>);

/// Resolve the caller from the `Authorization` header.
///
/// No header means anonymous. Anything else that does not end in a live member is a 401.
pub async fn resolve_principal(
    headers: &HeaderMap,
    db: &DatabaseConnection,
    tokens: &TokenService,
) -> AppResult<Option<Principal>> {
    let Some(raw) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = raw
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = tokens.verify_token(token).map_err(|reason| {
        tracing::debug!(%reason, "rejected bearer token");
        AppError::Unauthorized
    })?;

    let member = Member::find_by_id(claims.member_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            tracing::debug!(member_id = claims.member_id, "token for unknown member");
            AppError::Unauthorized
        })?;

    Ok(Some(Principal {
        member_id: member.id,
        role: member.role,
    }))
}

/// Attach a `Principal` when a valid token is present; anonymous requests pass through.
pub async fn optional_auth(
    Extension(db): Extension<DatabaseConnection>,
    Extension(tokens): Extension<TokenService>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(principal) = resolve_principal(&headers, &db, &tokens).await? {
        request.extensions_mut().insert(principal);
    }
    Ok(next.run(request).await)
}

/// Reject the request unless it carries a valid token for an existing member.
pub async fn require_auth(
    Extension(db): Extension<DatabaseConnection>,
    Extension(tokens): Extension<TokenService>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&headers, &db, &tokens)
        .await?
        .ok_or(AppError::Unauthorized)?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybePrincipal(parts.extensions.get::<Principal>().copied()))
    }
}
