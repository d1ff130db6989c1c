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

// Ergane Sandbox
// Simulates a host main loop driving the process scheduler over an
// in-memory project: one async asset pass and one blocking scene pass.

use anyhow::Result;
use ergane_core::presentation::LogPresenter;
use ergane_core::process::{ExecutionPolicy, ProcessConfig, SceneSaveMode};
use ergane_core::repo::{AssetRepository, ItemId, ItemMetadata, SceneProvider};
use ergane_runtime::strategy::{AssetBatchDescriptor, SceneBatchDescriptor};
use ergane_runtime::ProcessScheduler;
use std::collections::HashMap;
use std::time::Duration;

/// A toy project database: a list of named assets.
struct DemoProject {
    assets: Vec<String>,
}

impl AssetRepository for DemoProject {
    type Handle = String;

    fn find_matches(&self, filter: &str) -> Vec<ItemId> {
        self.assets
            .iter()
            .filter(|name| filter.is_empty() || name.contains(filter))
            .map(|name| ItemId::new(name.clone()))
            .collect()
    }

    fn resolve(&self, id: &ItemId) -> ItemMetadata<String> {
        let name = id.as_str().to_string();
        ItemMetadata::resolved(id.clone(), name.clone(), name.clone(), format!("assets/{name}"))
    }
}

/// A toy scene graph: one scene, a few objects.
struct DemoScenes {
    children: HashMap<String, Vec<String>>,
}

impl SceneProvider for DemoScenes {
    type SceneId = String;
    type Node = String;

    fn find_scenes(&self, _filter: &str) -> Vec<String> {
        vec!["playground".to_string()]
    }

    fn current_scene(&self) -> String {
        "playground".to_string()
    }

    fn root_objects(&self, _scene: &String) -> Vec<String> {
        vec!["environment".to_string(), "player".to_string()]
    }

    fn children_of(&self, node: &String) -> Vec<String> {
        self.children.get(node).cloned().unwrap_or_default()
    }

    fn save_scene(&mut self, scene: &String, mode: SceneSaveMode) -> Result<()> {
        log::info!("saving scene '{scene}' ({mode:?})");
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut scheduler = ProcessScheduler::new();

    let project = DemoProject {
        assets: (0..200).map(|i| format!("texture_{i:03}")).collect(),
    };
    scheduler.start_assets(
        project,
        AssetBatchDescriptor {
            config: ProcessConfig::new(ExecutionPolicy::Async)
                .with_filter("texture")
                .with_tick_budget(Duration::from_millis(4)),
            on_item: Some(Box::new(|meta, _pos| {
                // Stand-in for real per-asset work.
                std::thread::sleep(Duration::from_micros(300));
                log::trace!("reimported {}", meta.path.display());
            })),
            on_results: Some(Box::new(|results| {
                log::info!("reimported {} textures", results.len());
            })),
            on_done: Some(Box::new(|outcome| {
                log::info!("asset pass: {:?} in {:.3}s", outcome.status, outcome.elapsed_seconds);
            })),
            presenter: Some(Box::new(LogPresenter::new())),
            ..AssetBatchDescriptor::default()
        },
    );

    let mut children = HashMap::new();
    children.insert(
        "environment".to_string(),
        vec!["terrain".to_string(), "lighting".to_string()],
    );
    children.insert("player".to_string(), vec!["camera_rig".to_string()]);
    scheduler.start_scene_objects(
        DemoScenes { children },
        SceneBatchDescriptor {
            config: ProcessConfig::new(ExecutionPolicy::Blocking),
            save_mode: SceneSaveMode::PromptIfDirty,
            on_object: Some(Box::new(|node: &String, progress| {
                log::info!("touched '{node}' at {:.0}%", progress.total * 100.0);
            })),
            on_done: Some(Box::new(|outcome| {
                log::info!("scene pass: {:?} in {:.3}s", outcome.status, outcome.elapsed_seconds);
            })),
            presenter: Some(Box::new(LogPresenter::new())),
            ..SceneBatchDescriptor::default()
        },
    );

    // The simulated main loop: one tick per "frame" until everything is done.
    let mut frames = 0u32;
    while scheduler.running_count() > 0 {
        scheduler.tick();
        frames += 1;
        std::thread::sleep(Duration::from_millis(16));
    }
    log::info!("all processes finished after {frames} frames");

    scheduler.shutdown();
    Ok(())
}
