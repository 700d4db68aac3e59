//! 授权模块
//!
//! 身份认证由外部身份源完成；本服务从请求头接收已认证的 actor 身份，
//! 再执行角色/阶段门控与辖区过滤：
//! - [`CurrentActor`] - 当前操作者上下文
//! - [`require_actor`] / [`require_admin`] - 中间件
//! - [`permissions`] - 阶段→角色授权表
//! - [`ScopeResolver`] - 辖区解析

pub mod actor;
pub mod extractor;
pub mod middleware;
pub mod permissions;
pub mod scope;

pub use actor::CurrentActor;
pub use middleware::{require_actor, require_admin};
pub use scope::ScopeResolver;
