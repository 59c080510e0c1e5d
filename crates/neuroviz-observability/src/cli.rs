// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! The binary collects crate names from `--debug <crate>` (repeatable) and
//! `--debug-all`; `NEUROVIZ_DEBUG` adds more from the environment. The union
//! becomes one `EnvFilter` directive string.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable holding comma-separated crate names, or `all`
pub const DEBUG_ENV_VAR: &str = "NEUROVIZ_DEBUG";

/// Set of crates logging at debug level
///
/// # Example
/// ```rust
/// use neuroviz_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_names(["neuroviz-math"]);
/// assert!(flags.is_enabled("neuroviz-math"));
/// assert_eq!(flags.to_filter_string("info"), "neuroviz_math=debug,info");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Flags from bare crate names; `all` expands to every known crate and
    /// blank entries are ignored
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = CrateDebugFlags::default();
        for name in names {
            match name.as_ref().trim() {
                "" => {}
                "all" => flags.enable_all(),
                crate_name => flags.enable(crate_name),
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    pub fn merge(&mut self, other: CrateDebugFlags) {
        self.enabled.extend(other.enabled);
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled.contains(crate_name)
    }

    /// Enabled crate names, sorted
    pub fn enabled_crates(&self) -> Vec<&str> {
        self.enabled.iter().map(String::as_str).collect()
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled.is_empty()
    }

    /// `EnvFilter` directives: `<module>=debug` per enabled crate, then the default level
    ///
    /// `EnvFilter` matches module paths, so `neuroviz-math` is written as
    /// `neuroviz_math`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut directives: Vec<String> = self
            .enabled
            .iter()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        directives.sort();
        directives.push(default_level.to_string());
        directives.join(",")
    }
}

/// Debug flags from `NEUROVIZ_DEBUG` only
pub fn debug_flags_from_env() -> CrateDebugFlags {
    match env::var(DEBUG_ENV_VAR) {
        Ok(value) => CrateDebugFlags::from_names(value.split(',')),
        Err(_) => CrateDebugFlags::default(),
    }
}

/// Help text listing the debug switches and the crates they accept
pub fn debug_flags_help() -> String {
    format!(
        "Debug logging:\n  \
         --debug <CRATE>   debug output for one crate (repeatable)\n  \
         --debug-all       debug output for every crate\n  \
         {var}=a,b         same, from the environment ({var}=all for every crate)\n\n\
         Crates: {crates}\n",
        var = DEBUG_ENV_VAR,
        crates = KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_with_blanks_and_whitespace() {
        let flags = CrateDebugFlags::from_names(["neuroviz-data", " ", "neuroviz-math "]);
        assert_eq!(flags.enabled_crates(), vec!["neuroviz-data", "neuroviz-math"]);
        assert!(!flags.is_enabled("neuroviz-render"));
    }

    #[test]
    fn test_all_expands_to_known_crates() {
        let flags = CrateDebugFlags::from_names(["all"]);
        assert_eq!(flags.enabled_crates().len(), KNOWN_CRATES.len());
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} missing", crate_name);
        }
    }

    #[test]
    fn test_filter_directives_sorted_with_default_last() {
        let flags = CrateDebugFlags::from_names(["neuroviz-render", "neuroviz-math"]);
        assert_eq!(
            flags.to_filter_string("warn"),
            "neuroviz_math=debug,neuroviz_render=debug,warn"
        );
        assert_eq!(CrateDebugFlags::default().to_filter_string("info"), "info");
    }

    #[test]
    fn test_merge() {
        let mut flags = CrateDebugFlags::from_names(["neuroviz-config"]);
        assert!(flags.any_enabled());
        flags.merge(CrateDebugFlags::from_names(["neuroviz-data", "neuroviz-config"]));
        assert_eq!(flags.enabled_crates(), vec!["neuroviz-config", "neuroviz-data"]);
    }

    #[test]
    fn test_help_lists_crates() {
        let help = debug_flags_help();
        assert!(help.contains("--debug-all"));
        assert!(help.contains("neuroviz-render"));
        assert!(help.contains("NEUROVIZ_DEBUG=all"));
    }
}
