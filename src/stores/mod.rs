// Stores layer - Data access and repository pattern
pub mod role_store;
pub mod site_store;
pub mod user_store;

pub use role_store::RoleStore;
pub use site_store::SiteStore;
pub use user_store::UserStore;

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::ColumnTrait;

/// Case-insensitive substring match on a text column
///
/// LIKE wildcards in the needle are escaped so user input is matched literally.
/// Only ASCII letters fold, matching SQLite's `LOWER` on the column side.
pub(crate) fn contains_ignore_case<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let escaped = needle
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}

/// Current time in the storage resolution (Unix milliseconds)
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
