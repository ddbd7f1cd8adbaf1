//! Domain models, request resources and response resources

pub mod appliance;
pub mod appointment;
pub mod report;
pub mod user;

use serde::Deserialize;
use utoipa::IntoParams;
use validator::ValidationError;

/// 列表默认条数
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// 列表最大条数
pub const MAX_PAGE_LIMIT: i64 = 200;

/// 拒绝只含空白的必填文本
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// 分页参数
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Page {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Page {
    /// 限制在合法范围内
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
            offset: self.offset.max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}
