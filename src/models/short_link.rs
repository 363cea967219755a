// ABOUTME: Short link model mapping a generated hash token to an original URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link
///
/// The hash token is generated at creation time and unique; lookup by hash
/// is a direct indexed read. Lists come back newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// Surrogate key
    pub id: i64,
    /// The URL being shortened
    pub original_url: String,
    /// Generated hash token, unique
    pub url_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
