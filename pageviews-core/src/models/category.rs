//! Category types and their upstream tokens.
//!
//! This module contains the closed category vocabularies callers filter by:
//! - [`AccessMethod`] - How a page was reached (desktop, mobile app, ...)
//! - [`AgentType`] - Who requested the page (user, spider, ...)
//! - [`Granularity`] - Time bucket of a timeseries
//! - [`Source`] - Which upstream counting API a token is meant for
//!
//! The legacy and current sources spell access methods differently. The
//! current source has no token for the combined [`AccessMethod::Mobile`], so
//! [`AccessMethod::token`] returns an error for it; callers split it into
//! [`AccessMethod::MOBILE_PARTS`] first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

// ============================================================================
// Source
// ============================================================================

/// Upstream counting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Retired pagecounts API, authoritative before the cutover.
    Legacy,
    /// Pageviews API, authoritative from the cutover onward.
    Current,
}

impl Source {
    /// Returns the display name for this source.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy pagecounts",
            Self::Current => "pageviews",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Access Method
// ============================================================================

/// Access method used to reach a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMethod {
    /// Desktop and mobile combined.
    All,
    /// Desktop site.
    Desktop,
    /// Mobile app and mobile web combined.
    Mobile,
    /// Mobile app.
    MobileApp,
    /// Mobile web site.
    MobileWeb,
}

impl AccessMethod {
    /// The current-source access methods that make up [`AccessMethod::Mobile`].
    pub const MOBILE_PARTS: [AccessMethod; 2] = [Self::MobileApp, Self::MobileWeb];

    /// Returns all access methods.
    pub fn all() -> &'static [AccessMethod] {
        &[
            Self::All,
            Self::Desktop,
            Self::Mobile,
            Self::MobileApp,
            Self::MobileWeb,
        ]
    }

    /// Returns the CLI name for this access method.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::MobileApp => "mobile-app",
            Self::MobileWeb => "mobile-web",
        }
    }

    /// Returns true for the combined mobile method.
    pub fn is_mobile_composite(&self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Translates this access method to the token `source` expects.
    ///
    /// The legacy source collapses every mobile variant into `mobile-site`.
    /// The current source rejects [`AccessMethod::Mobile`].
    pub fn token(self, source: Source) -> Result<&'static str, InputError> {
        match source {
            Source::Legacy => Ok(self.legacy_token()),
            Source::Current => match self {
                Self::All => Ok("all-access"),
                Self::Desktop => Ok("desktop"),
                Self::MobileApp => Ok("mobile-app"),
                Self::MobileWeb => Ok("mobile-web"),
                Self::Mobile => Err(InputError::UnsupportedAccess {
                    operation: "pageviews API",
                    access: self,
                }),
            },
        }
    }

    /// Legacy token; total over every variant.
    pub fn legacy_token(self) -> &'static str {
        match self {
            Self::All => "all-sites",
            Self::Desktop => "desktop-site",
            Self::Mobile | Self::MobileApp | Self::MobileWeb => "mobile-site",
        }
    }
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "ALL",
            Self::Desktop => "DESKTOP",
            Self::Mobile => "MOBILE",
            Self::MobileApp => "MOBILE_APP",
            Self::MobileWeb => "MOBILE_WEB",
        };
        f.write_str(name)
    }
}

impl FromStr for AccessMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|a| a.cli_name() == normalized)
            .ok_or_else(|| {
                format!("Unknown access method: {s}. Valid options: all, desktop, mobile, mobile-app, mobile-web")
            })
    }
}

// ============================================================================
// Agent Type
// ============================================================================

/// Kind of agent that issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Every agent type.
    All,
    /// Human users.
    User,
    /// Self-identified crawlers.
    Spider,
    /// Traffic classified as automated.
    Automated,
}

impl AgentType {
    /// Returns all agent types.
    pub fn all() -> &'static [AgentType] {
        &[Self::All, Self::User, Self::Spider, Self::Automated]
    }

    /// Upstream token for this agent type.
    pub fn token(self) -> &'static str {
        match self {
            Self::All => "all-agents",
            Self::User => "user",
            Self::Spider => "spider",
            Self::Automated => "automated",
        }
    }

    /// Returns the CLI name for this agent type.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::User => "user",
            Self::Spider => "spider",
            Self::Automated => "automated",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AgentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|a| a.cli_name() == normalized || a.token() == normalized)
            .ok_or_else(|| {
                format!("Unknown agent type: {s}. Valid options: all, user, spider, automated")
            })
    }
}

// ============================================================================
// Granularity
// ============================================================================

/// Time bucket of a timeseries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One row per hour.
    Hourly,
    /// One row per day.
    Daily,
    /// One row per month.
    Monthly,
}

impl Granularity {
    /// Returns all granularities.
    pub fn all() -> &'static [Granularity] {
        &[Self::Hourly, Self::Daily, Self::Monthly]
    }

    /// Upstream token for this granularity. Both sources share it.
    pub fn token(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|g| g.token() == normalized)
            .ok_or_else(|| format!("Unknown granularity: {s}. Valid options: hourly, daily, monthly"))
    }
}

// ============================================================================
// Tests
// ============================================================================
