//! 条件编译日志系统
//!
//! 根据 feature 选择不同的日志后端:
//! - `log-defmt`: 使用 defmt (高效二进制日志)
//! - `dev` / `log-println`: 使用 esp-println (文本日志)
//! - 默认: 完全禁用日志 (零开销，参数只做类型检查)
//!
//! # 日志级别
//! - `log_error!`: 错误信息
//! - `log_warn!`: 警告信息
//! - `log_info!`: 一般信息
//! - `log_debug!`: 调试信息
//! - `log_trace!`: 详细跟踪 (等待/唤醒路径)
//!
//! 格式串只使用 `{}` 占位符，保证三种后端都能编译。

// ===================================================================
// 后端分发
// ===================================================================

#[cfg(feature = "log-defmt")]
#[doc(hidden)]
#[macro_export]
macro_rules! __log_backend {
    ($level:ident, $tag:literal, $($arg:tt)*) => {
        defmt::$level!($($arg)*)
    };
}

#[cfg(all(any(feature = "dev", feature = "log-println"), not(feature = "log-defmt")))]
#[doc(hidden)]
#[macro_export]
macro_rules! __log_backend {
    ($level:ident, $tag:literal, $($arg:tt)*) => {
        esp_println::println!("[{}] {}", $tag, format_args!($($arg)*))
    };
}

#[cfg(not(any(feature = "dev", feature = "log-defmt", feature = "log-println")))]
#[doc(hidden)]
#[macro_export]
macro_rules! __log_backend {
    ($level:ident, $tag:literal, $($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

// ===================================================================
// 日志宏
// ===================================================================

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log_backend!(error, "ERROR", $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log_backend!(warn, "WARN", $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log_backend!(info, "INFO", $($arg)*) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log_backend!(debug, "DEBUG", $($arg)*) };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => { $crate::__log_backend!(trace, "TRACE", $($arg)*) };
}

// ===================================================================
// 断言宏
// ===================================================================

/// Debug 断言 (仅在 debug 模式下检查)
///
/// 失败时先记录 error 日志再 panic，release 构建中完全移除。
#[macro_export]
macro_rules! debug_assert_msg {
    ($cond:expr, $($arg:tt)*) => {
        if cfg!(debug_assertions) && !$cond {
            $crate::log_error!($($arg)*);
            panic!($($arg)*);
        }
    };
}
