// crates/advert-contract-core/src/contract/routes.rs
// ============================================================================
// Module: Versioned Routes
// Description: Logical operations bound to versioned HTTP routes.
// Purpose: Select API revisions per operation from configuration.
// Dependencies: crate::contract::ContractError, serde
// ============================================================================

//! ## Overview
//! Each logical [`Operation`] is served by one or more versioned [`Route`]s.
//! Versions are independent routes sharing the same underlying resource: the
//! model never assumes two versions respond identically, only that they
//! address the same advertisement.
//! Invariants:
//! - Path segments are returned unencoded; transports percent-encode them.
//! - A [`RouteTable`] always has at least one statistics version and no
//!   duplicates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::contract::ContractError;

// ============================================================================
// SECTION: Versions and Methods
// ============================================================================

/// API revision encoded in the path prefix (`/api/1/...`, `/api/2/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVersion {
    /// `/api/1` prefix.
    V1,
    /// `/api/2` prefix.
    V2,
}

impl ApiVersion {
    /// All known versions in ascending order.
    pub const ALL: [Self; 2] = [Self::V1, Self::V2];

    /// Returns a stable label for the version.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Returns the path segment that follows `/api/`.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ContractError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            other => Err(ContractError::UnknownVersion(other.to_string())),
        }
    }
}

/// HTTP method used by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Logical operation of the advertisement contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create an advertisement.
    Create,
    /// Read an advertisement by identifier.
    ReadById,
    /// List advertisements of a seller.
    ListBySeller,
    /// Read advertisement statistics.
    ReadStatistics,
    /// Delete an advertisement.
    Delete,
}

impl Operation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::ReadById => "read_by_id",
            Self::ListBySeller => "list_by_seller",
            Self::ReadStatistics => "read_statistics",
            Self::Delete => "delete",
        }
    }

    /// Returns the HTTP method serving the operation.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Create => HttpMethod::Post,
            Self::ReadById | Self::ListBySeller | Self::ReadStatistics => HttpMethod::Get,
            Self::Delete => HttpMethod::Delete,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Concrete route for one request.
///
/// # Invariants
/// - Identifier and seller segments are raw text so malformed values can be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// `POST /api/{v}/item`.
    Create {
        /// API revision.
        version: ApiVersion,
    },
    /// `GET /api/{v}/item/{id}`.
    ReadById {
        /// API revision.
        version: ApiVersion,
        /// Advertisement identifier segment.
        id: String,
    },
    /// `GET /api/{v}/{seller}/item`.
    ListBySeller {
        /// API revision.
        version: ApiVersion,
        /// Seller identifier segment.
        seller: String,
    },
    /// `GET /api/{v}/statistic/{id}`.
    Statistics {
        /// API revision.
        version: ApiVersion,
        /// Advertisement identifier segment.
        id: String,
    },
    /// `DELETE /api/{v}/item/{id}`.
    Delete {
        /// API revision.
        version: ApiVersion,
        /// Advertisement identifier segment.
        id: String,
    },
}

impl Route {
    /// Returns the logical operation served by the route.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Create {
                ..
            } => Operation::Create,
            Self::ReadById {
                ..
            } => Operation::ReadById,
            Self::ListBySeller {
                ..
            } => Operation::ListBySeller,
            Self::Statistics {
                ..
            } => Operation::ReadStatistics,
            Self::Delete {
                ..
            } => Operation::Delete,
        }
    }

    /// Returns the API revision of the route.
    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        match self {
            Self::Create {
                version,
            }
            | Self::ReadById {
                version, ..
            }
            | Self::ListBySeller {
                version, ..
            }
            | Self::Statistics {
                version, ..
            }
            | Self::Delete {
                version, ..
            } => *version,
        }
    }

    /// Returns the HTTP method of the route.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.operation().method()
    }

    /// Returns the unencoded path segments after the base URL.
    #[must_use]
    pub fn path_segments(&self) -> Vec<&str> {
        let version = self.version().path_segment();
        match self {
            Self::Create {
                ..
            } => vec!["api", version, "item"],
            Self::ReadById {
                id, ..
            }
            | Self::Delete {
                id, ..
            } => vec!["api", version, "item", id.as_str()],
            Self::ListBySeller {
                seller, ..
            } => vec!["api", version, seller.as_str(), "item"],
            Self::Statistics {
                id, ..
            } => vec!["api", version, "statistic", id.as_str()],
        }
    }

    /// Returns a display path such as `/api/1/item/abc` (unencoded).
    #[must_use]
    pub fn display_path(&self) -> String {
        let mut path = String::new();
        for segment in self.path_segments() {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.display_path())
    }
}

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// Versions selected for each logical operation.
///
/// # Invariants
/// - `statistics` is non-empty and free of duplicates once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteTable {
    /// Version used for create.
    pub create: ApiVersion,
    /// Version used for read by id.
    pub read: ApiVersion,
    /// Version used for list by seller.
    pub list: ApiVersion,
    /// Versions exercised for statistics, in order.
    pub statistics: Vec<ApiVersion>,
    /// Version used for delete.
    pub delete: ApiVersion,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            create: ApiVersion::V1,
            read: ApiVersion::V1,
            list: ApiVersion::V1,
            statistics: vec![ApiVersion::V1, ApiVersion::V2],
            delete: ApiVersion::V2,
        }
    }
}

impl RouteTable {
    /// Validates the table.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when no statistics version is selected or a
    /// version is listed twice.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.statistics.is_empty() {
            return Err(ContractError::NoStatisticsRoute);
        }
        for (index, version) in self.statistics.iter().enumerate() {
            if self.statistics[.. index].contains(version) {
                return Err(ContractError::DuplicateStatisticsRoute(*version));
            }
        }
        Ok(())
    }

    /// Route for creating an advertisement.
    #[must_use]
    pub const fn create_route(&self) -> Route {
        Route::Create {
            version: self.create,
        }
    }

    /// Route for reading an advertisement by raw identifier.
    #[must_use]
    pub fn read_route(&self, id: &str) -> Route {
        Route::ReadById {
            version: self.read,
            id: id.to_string(),
        }
    }

    /// Route for listing a seller's advertisements by raw seller segment.
    #[must_use]
    pub fn list_route(&self, seller: &str) -> Route {
        Route::ListBySeller {
            version: self.list,
            seller: seller.to_string(),
        }
    }

    /// Route for reading statistics through a specific version.
    #[must_use]
    pub fn statistics_route(version: ApiVersion, id: &str) -> Route {
        Route::Statistics {
            version,
            id: id.to_string(),
        }
    }

    /// Route for deleting an advertisement by raw identifier.
    #[must_use]
    pub fn delete_route(&self, id: &str) -> Route {
        Route::Delete {
            version: self.delete,
            id: id.to_string(),
        }
    }
}
