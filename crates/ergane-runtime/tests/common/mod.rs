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

//! In-memory repository and scene-graph fixtures shared by the integration
//! tests. Handles are plain strings; hierarchy is name-keyed.

#![allow(dead_code)]

use ergane_core::process::{ComponentSearchType, SceneSaveMode};
use ergane_core::repo::{AssetRepository, ComponentSource, ItemId, ItemMetadata, SceneProvider};
use ergane_runtime::ProcessScheduler;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Where a fake component sits within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Root,
    ActiveChild,
    InactiveChild,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeComponent {
    pub type_name: String,
    pub placement: Placement,
}

impl FakeComponent {
    pub fn new(type_name: &str, placement: Placement) -> Self {
        Self {
            type_name: type_name.to_string(),
            placement,
        }
    }
}

pub struct ItemEntry {
    pub id: ItemId,
    pub name: String,
    pub valid: bool,
    pub components: Vec<FakeComponent>,
}

/// A flat item repository backed by a vector; `find_matches` does substring
/// matching on item names, and the empty filter matches everything.
#[derive(Default)]
pub struct MemoryRepository {
    pub items: Vec<ItemEntry>,
}

impl MemoryRepository {
    pub fn with_names(names: &[&str]) -> Self {
        let items = names
            .iter()
            .map(|name| ItemEntry {
                id: ItemId::new(format!("id:{name}")),
                name: name.to_string(),
                valid: true,
                components: Vec::new(),
            })
            .collect();
        Self { items }
    }

    pub fn push(&mut self, name: &str, valid: bool, components: Vec<FakeComponent>) {
        self.items.push(ItemEntry {
            id: ItemId::new(format!("id:{name}")),
            name: name.to_string(),
            valid,
            components,
        });
    }
}

impl AssetRepository for MemoryRepository {
    type Handle = String;

    fn find_matches(&self, filter: &str) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|entry| filter.is_empty() || entry.name.contains(filter))
            .map(|entry| entry.id.clone())
            .collect()
    }

    fn resolve(&self, id: &ItemId) -> ItemMetadata<String> {
        match self.items.iter().find(|entry| &entry.id == id) {
            Some(entry) if entry.valid => ItemMetadata::resolved(
                entry.id.clone(),
                entry.name.clone(),
                entry.name.clone(),
                format!("assets/{}", entry.name),
            ),
            _ => ItemMetadata::missing(id.clone()),
        }
    }
}

impl ComponentSource for MemoryRepository {
    type Component = FakeComponent;

    fn components_of(&self, handle: &String, search: ComponentSearchType) -> Vec<FakeComponent> {
        let Some(entry) = self.items.iter().find(|entry| &entry.name == handle) else {
            return Vec::new();
        };
        entry
            .components
            .iter()
            .filter(|component| match search {
                ComponentSearchType::RootOnly => component.placement == Placement::Root,
                ComponentSearchType::ActiveChildren => {
                    component.placement != Placement::InactiveChild
                }
                ComponentSearchType::AllChildren => true,
            })
            .cloned()
            .collect()
    }
}

/// A name-keyed scene graph. Scene saves are appended to the shared journal
/// so tests can assert ordering against object visits.
pub struct MemoryScenes {
    pub scenes: Vec<(String, Vec<String>)>,
    pub children: HashMap<String, Vec<String>>,
    pub current: String,
    pub journal: Arc<Mutex<Vec<String>>>,
}

impl MemoryScenes {
    pub fn single_scene(name: &str, roots: &[&str]) -> Self {
        Self {
            scenes: vec![(
                name.to_string(),
                roots.iter().map(|r| r.to_string()).collect(),
            )],
            children: HashMap::new(),
            current: name.to_string(),
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_children(mut self, parent: &str, children: &[&str]) -> Self {
        self.children.insert(
            parent.to_string(),
            children.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn add_scene(mut self, name: &str, roots: &[&str]) -> Self {
        self.scenes.push((
            name.to_string(),
            roots.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }
}

impl SceneProvider for MemoryScenes {
    type SceneId = String;
    type Node = String;

    fn find_scenes(&self, filter: &str) -> Vec<String> {
        self.scenes
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| filter.is_empty() || name.contains(filter))
            .collect()
    }

    fn current_scene(&self) -> String {
        self.current.clone()
    }

    fn root_objects(&self, scene: &String) -> Vec<String> {
        self.scenes
            .iter()
            .find(|(name, _)| name == scene)
            .map(|(_, roots)| roots.clone())
            .unwrap_or_default()
    }

    fn children_of(&self, node: &String) -> Vec<String> {
        self.children.get(node).cloned().unwrap_or_default()
    }

    fn save_scene(&mut self, scene: &String, mode: SceneSaveMode) -> anyhow::Result<()> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("save:{scene}:{mode:?}"));
        Ok(())
    }
}

/// Ticks the scheduler until it goes idle and returns the tick count.
pub fn drive(scheduler: &mut ProcessScheduler, max_ticks: usize) -> usize {
    let mut ticks = 0;
    while scheduler.running_count() > 0 {
        scheduler.tick();
        ticks += 1;
        assert!(ticks <= max_ticks, "scheduler did not go idle in {max_ticks} ticks");
    }
    ticks
}

/// A shared cell tests use to observe callbacks.
pub type Shared<T> = Arc<Mutex<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}
