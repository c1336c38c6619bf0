//! Upload API 模块 (经理/管理员)
//!
//! 菜品图片经多部分表单上传，服务端校验后转发到第三方图床，
//! 返回公开 URL (写入菜品的 image_url)。

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/manager/upload", post(handler::upload))
        .layer(DefaultBodyLimit::max(handler::MAX_FILE_SIZE + 64 * 1024))
}
