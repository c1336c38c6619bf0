//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AUTH_COOKIE, CurrentUser, JwtService, policy};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 从 Cookie 头中提取会话令牌
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE).then_some(value)
    })
}

/// 从请求头中提取令牌：优先 HttpOnly cookie，其次 Authorization Bearer
pub fn extract_token(headers: &http::HeaderMap) -> Option<&str> {
    if let Some(cookie) = headers
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        && let Some(token) = token_from_cookie_header(cookie)
    {
        return Some(token);
    }

    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
}

/// 认证 + 角色检查中间件
///
/// 验证成功后将 [`CurrentUser`] 注入请求扩展，并根据
/// [`policy`] 的前缀策略表检查角色。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/auth/login`, `/api/auth/register`, `/api/health`
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无令牌 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
/// | 角色不允许 | 403 Forbidden |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route =
        path == "/api/auth/login" || path == "/api/auth/register" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let token = match extract_token(req.headers()) {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    let jwt_service = state.get_jwt_service();
    let user = match jwt_service.validate_token(token) {
        Ok(claims) => CurrentUser::try_from(claims)
            .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            return match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            };
        }
    };

    // 角色前缀策略检查 (集中策略表，一次判定)
    if !policy::is_allowed(&path, user.role) {
        security_log!(
            "WARN",
            "role_denied",
            user_id = user.id.clone(),
            user_role = user.role.as_str(),
            path = path.clone()
        );
        return Err(AppError::forbidden(format!(
            "Role '{}' may not access {}",
            user.role, path
        )));
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_parsing_finds_token() {
        assert_eq!(
            token_from_cookie_header("foh_token=abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(
            token_from_cookie_header("other=1; foh_token=tok; theme=dark"),
            Some("tok")
        );
        assert_eq!(token_from_cookie_header("other=1; theme=dark"), None);
    }
}
