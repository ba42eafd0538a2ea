//! # 日志初始化
//!
//! 库代码通过 `tracing` 记录日志，由可执行文件安装订阅者。
//! `RUST_LOG` 优先；未设置时默认 `warn`，`-v` 提升为 `debug`。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// 默认过滤级别
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "gcu=debug"
    } else {
        "warn"
    }
}

/// 安装全局日志订阅者（输出到 stderr）
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(true), "gcu=debug");
        assert_eq!(default_directive(false), "warn");
        assert!(default_directive(true).parse::<tracing_subscriber::filter::Directive>().is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
