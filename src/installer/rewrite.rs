//! Import path rewriting for component sources
//!
//! Registry sources import shared code through fixed paths. When a component
//! is copied into a project those paths are rewritten to the project's
//! aliases:
//!
//! ```text
//! @/lib/cn               -> <utils alias>/cn
//! @/components/ui/card   -> <components alias>/card
//! from "./button"        -> from "<components alias>/button"
//! ```
//!
//! All three patterns are matched in one pass, so text produced by one rule is
//! never rewritten again by another (an alias such as `@/components/ui/lib`
//! stays intact).

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Internal import prefix for utilities
pub const UTILS_IMPORT_PREFIX: &str = "@/lib/";

/// Internal import prefix for shared components
pub const COMPONENTS_IMPORT_PREFIX: &str = "@/components/ui/";

#[allow(clippy::expect_used)]
static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(?P<utils>{})|(?P<components>{})|from(?P<ws>\s+)(?P<open>["'])\./(?P<name>[\w-]+)(?P<close>["'])"#,
        regex::escape(UTILS_IMPORT_PREFIX),
        regex::escape(COMPONENTS_IMPORT_PREFIX),
    );
    Regex::new(&pattern).expect("import pattern is valid")
});

/// Rewrite internal imports in a component source to the given aliases
pub fn rewrite_imports(source: &str, components_alias: &str, utils_alias: &str) -> String {
    IMPORT_PATTERN
        .replace_all(source, |caps: &Captures<'_>| {
            if caps.name("utils").is_some() {
                return format!("{utils_alias}/");
            }
            if caps.name("components").is_some() {
                return format!("{components_alias}/");
            }

            let open = &caps["open"];
            if open != &caps["close"] {
                return caps[0].to_string();
            }
            format!(
                "from{}{open}{components_alias}/{}{open}",
                &caps["ws"], &caps["name"]
            )
        })
        .into_owned()
}
