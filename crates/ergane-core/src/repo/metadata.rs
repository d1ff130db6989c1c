// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A stable, opaque identifier for an item known to the repository.
///
/// The identifier stays valid across renames and moves of the underlying
/// asset; only deletion invalidates it. Its textual content is meaningful
/// solely to the repository that minted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a repository-minted identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Everything the runtime knows about one discovered item.
///
/// `H` is the repository's resolved handle type (an asset reference, a
/// prefab-like container, ...). An item whose identifier no longer resolves
/// (deleted between enumeration and processing) carries `is_valid = false`
/// and is excluded from matching regardless of any predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMetadata<H> {
    /// The stable identifier this metadata was resolved from.
    pub id: ItemId,
    /// The resolved handle; `None` when the identifier no longer resolves.
    pub handle: Option<H>,
    /// Display name for progress surfaces and logs.
    pub name: String,
    /// Project-relative path of the item.
    pub path: PathBuf,
    /// Whether the identifier still resolved at enumeration time.
    pub is_valid: bool,
}

impl<H> ItemMetadata<H> {
    /// Metadata for an identifier that resolved successfully.
    pub fn resolved(
        id: ItemId,
        handle: H,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id,
            handle: Some(handle),
            name: name.into(),
            path: path.into(),
            is_valid: true,
        }
    }

    /// Metadata for an identifier that no longer resolves.
    pub fn missing(id: ItemId) -> Self {
        Self {
            id,
            handle: None,
            name: String::new(),
            path: PathBuf::new(),
            is_valid: false,
        }
    }
}
