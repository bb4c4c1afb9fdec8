// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Gateway payload types

use serde::{Deserialize, Serialize};

/// One deployed function's status record as reported by the gateway.
///
/// The gateway owns the field-level schema. Beyond `name`, everything is
/// kept as-is under [`FunctionStatus::extra`] so new gateway fields pass
/// through without a client release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionStatus {
    /// Function name, unique within its namespace
    pub name: String,

    /// Remaining gateway-owned status fields (image, replicas, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FunctionStatus {
    /// Render one of the gateway-owned fields as display text.
    ///
    /// Strings come back unquoted; other JSON values use their JSON
    /// rendering; a missing field comes back as `None`.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.extra.get(key).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
