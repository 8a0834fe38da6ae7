// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, ValidationError};

/// Errors surfaced by the planner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The candidate failed a blocking check and was not sent to the store.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Loading the definitions of a view failed. No partial result exists.
    #[error("failed to fetch events: {source}")]
    FetchFailed {
        #[source]
        source: StoreError,
    },

    /// A create, update or delete call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether re-issuing the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Validation(_) => false,
            Error::FetchFailed { source } | Error::Store(source) => {
                matches!(source, StoreError::Database(_) | StoreError::Other(_))
            }
        }
    }
}
