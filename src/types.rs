use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Asset categories known to the path table.
///
/// Every category has exactly one entry in [`crate::config::PathTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Markup,
    Scripts,
    Styles,
    Icons,
    Data,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Markup,
        AssetCategory::Scripts,
        AssetCategory::Styles,
        AssetCategory::Icons,
        AssetCategory::Data,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Markup => "markup",
            AssetCategory::Scripts => "scripts",
            AssetCategory::Styles => "styles",
            AssetCategory::Icons => "icons",
            AssetCategory::Data => "data",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markup" => Ok(AssetCategory::Markup),
            "scripts" => Ok(AssetCategory::Scripts),
            "styles" => Ok(AssetCategory::Styles),
            "icons" => Ok(AssetCategory::Icons),
            "data" => Ok(AssetCategory::Data),
            other => Err(format!(
                "unknown asset category: {other} (expected one of markup, scripts, styles, icons, data)"
            )),
        }
    }
}

/// The unit of work the orchestrator and the watch runtime schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKind {
    Styles,
    Scripts,
    Markup,
    Icons,
    /// Static export of the component catalog.
    Styleguide,
}

impl TaskKind {
    /// The four asset transforms, in the order the sequences run them.
    pub const TRANSFORMS: [TaskKind; 4] = [
        TaskKind::Styles,
        TaskKind::Scripts,
        TaskKind::Markup,
        TaskKind::Icons,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Styles => "styles",
            TaskKind::Scripts => "scripts",
            TaskKind::Markup => "markup",
            TaskKind::Icons => "icons",
            TaskKind::Styleguide => "styleguide",
        }
    }

    /// How connected browsers should pick up this task's fresh output.
    pub fn reload_kind(self) -> ReloadKind {
        match self {
            TaskKind::Styles => ReloadKind::InjectCss,
            _ => ReloadKind::FullPage,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a browser reloads the whole page or swaps stylesheets in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadKind {
    FullPage,
    InjectCss,
}

/// Build mode handed by value to every transform.
///
/// `production = true` means minified output and no source maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub production: bool,
}

impl BuildConfig {
    pub fn development() -> Self {
        Self { production: false }
    }

    pub fn production() -> Self {
        Self { production: true }
    }

    pub fn mode_name(&self) -> &'static str {
        if self.production {
            "production"
        } else {
            "development"
        }
    }
}

/// Result of one task run as seen by the sequences and the watch runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed,
}

impl TaskOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, TaskOutcome::Success)
    }
}
