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

//! User-supplied match predicates.
//!
//! A predicate decides whether a discovered item, component, or scene object
//! enters processing. Predicates run after the validity gate: an item whose
//! identifier no longer resolves is excluded before any predicate sees it.

use crate::repo::ItemMetadata;

/// Selects which resolved items enter processing.
pub type MetadataPredicate<H> = Box<dyn Fn(&ItemMetadata<H>) -> bool + Send>;

/// Selects which components of an item enter processing.
pub type ComponentPredicate<C> = Box<dyn Fn(&C) -> bool + Send>;

/// Selects which scene objects enter processing.
pub type NodePredicate<N> = Box<dyn Fn(&N) -> bool + Send>;

/// A predicate that accepts everything.
pub fn accept_all<T: ?Sized>() -> Box<dyn Fn(&T) -> bool + Send> {
    Box::new(|_| true)
}

/// Combines predicates conjunctively: the result accepts a value only when
/// every given predicate accepts it. An empty list accepts everything.
pub fn all_of<T: ?Sized + 'static>(
    predicates: Vec<Box<dyn Fn(&T) -> bool + Send>>,
) -> Box<dyn Fn(&T) -> bool + Send> {
    Box::new(move |value| predicates.iter().all(|predicate| predicate(value)))
}
