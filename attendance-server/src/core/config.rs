//! Server configuration
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/attendance | 工作目录（数据库、日志） |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | ENVIRONMENT | development | 运行环境 |
//! | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
//! | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
//! | AUDIT_BUFFER_SIZE | 1024 | 审计通道容量 |
//! | IMPORT_INITIAL_STAGE | supervisor | 批量导入起始阶段 (supervisor \| gs) |

use shared::models::Stage;

/// Import policy: which stage a freshly imported record starts at.
///
/// The two legacy import paths disagreed on this, so it is configuration
/// rather than a hardcoded guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Imported records start at `PENDING_SUPERVISOR`
    StartAtSupervisor,
    /// Imported records skip directly to `PENDING_GS`
    StartAtGs,
}

impl ImportPolicy {
    pub fn from_env_value(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gs" | "pending_gs" => ImportPolicy::StartAtGs,
            _ => ImportPolicy::StartAtSupervisor,
        }
    }

    /// The stage imported records are seeded at
    pub fn initial_stage(&self) -> Stage {
        match self {
            ImportPolicy::StartAtSupervisor => Stage::PendingSupervisor,
            ImportPolicy::StartAtGs => Stage::PendingGs,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// 审计日志通道容量
    pub audit_buffer_size: usize,
    /// 批量导入起始阶段策略
    pub import_policy: ImportPolicy,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/attendance".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            audit_buffer_size: std::env::var("AUDIT_BUFFER_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
            import_policy: std::env::var("IMPORT_INITIAL_STAGE")
                .map(|v| ImportPolicy::from_env_value(&v))
                .unwrap_or(ImportPolicy::StartAtSupervisor),
        }
    }

    /// 日志目录 (WORK_DIR/logs)
    pub fn log_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("logs")
    }
}

/// Prepare the process environment: dotenv, work directory layout, logger.
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    std::fs::create_dir_all(config.log_dir())?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = config.log_dir();
    crate::utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.to_str());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_policy_parses_both_paths() {
        assert_eq!(
            ImportPolicy::from_env_value("gs"),
            ImportPolicy::StartAtGs
        );
        assert_eq!(
            ImportPolicy::from_env_value("PENDING_GS"),
            ImportPolicy::StartAtGs
        );
        assert_eq!(
            ImportPolicy::from_env_value("supervisor"),
            ImportPolicy::StartAtSupervisor
        );
        // unknown values fall back to the conservative default
        assert_eq!(
            ImportPolicy::from_env_value("??"),
            ImportPolicy::StartAtSupervisor
        );
    }

    #[test]
    fn policy_maps_to_stage() {
        assert_eq!(
            ImportPolicy::StartAtSupervisor.initial_stage(),
            Stage::PendingSupervisor
        );
        assert_eq!(ImportPolicy::StartAtGs.initial_stage(), Stage::PendingGs);
    }
}
