// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the boundary pipeline.

/// Result type alias for boundary operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the boundary pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input mesh buffers are malformed.
    #[error("invalid surface mesh: {0}")]
    Geometry(#[from] navwall_geometry::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Boundary-distance filtering was requested without a distance oracle.
    #[error("boundary distance filter is enabled but no boundary oracle was supplied")]
    MissingBoundaryOracle,
}
