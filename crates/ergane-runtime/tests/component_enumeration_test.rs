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

mod common;

use common::{shared, FakeComponent, MemoryRepository, Placement};
use ergane_core::process::{ComponentSearchType, ExecutionPolicy, ProcessConfig, ProcessStatus};
use ergane_runtime::step::{StepSequence, StepSignal};
use ergane_runtime::strategy::{
    ComponentBatchDescriptor, ComponentBatchMode, ComponentEnumeration,
};
use ergane_runtime::ProcessScheduler;

fn collider(placement: Placement) -> FakeComponent {
    FakeComponent::new("Collider", placement)
}

#[test]
fn container_mode_requires_a_matching_root_component() {
    let mut repo = MemoryRepository::default();
    repo.push("has_root_collider", true, vec![collider(Placement::Root)]);
    repo.push(
        "collider_on_child_only",
        true,
        vec![collider(Placement::ActiveChild)],
    );
    repo.push(
        "unrelated_component",
        true,
        vec![FakeComponent::new("Light", Placement::Root)],
    );

    let matched = shared(Vec::<String>::new());
    let results_len = shared(None::<usize>);
    let status = shared(None::<ProcessStatus>);

    let mut scheduler = ProcessScheduler::new();
    let matched_cb = matched.clone();
    let results_cb = results_len.clone();
    let status_cb = status.clone();
    scheduler.start_components(
        repo,
        ComponentBatchDescriptor {
            config: ProcessConfig::new(ExecutionPolicy::Blocking),
            mode: ComponentBatchMode::Containers,
            component_predicate: Box::new(|c: &FakeComponent| c.type_name == "Collider"),
            on_item: Some(Box::new(move |meta, _pos| {
                matched_cb.lock().unwrap().push(meta.name.clone());
            })),
            on_results: Some(Box::new(move |results| {
                *results_cb.lock().unwrap() = Some(results.len());
            })),
            on_done: Some(Box::new(move |o| {
                *status_cb.lock().unwrap() = Some(o.status);
            })),
            ..ComponentBatchDescriptor::default()
        },
    );
    scheduler.tick();

    assert_eq!(*matched.lock().unwrap(), vec!["has_root_collider"]);
    assert_eq!(*results_len.lock().unwrap(), Some(1));
    assert_eq!(*status.lock().unwrap(), Some(ProcessStatus::Success));
}

#[test]
fn component_mode_expansion_honors_the_search_type() {
    let cases = [
        (ComponentSearchType::RootOnly, 1usize),
        (ComponentSearchType::ActiveChildren, 2usize),
        (ComponentSearchType::AllChildren, 3usize),
    ];

    for (search, expected) in cases {
        let mut repo = MemoryRepository::default();
        repo.push(
            "rig",
            true,
            vec![
                collider(Placement::Root),
                collider(Placement::ActiveChild),
                collider(Placement::InactiveChild),
                FakeComponent::new("Light", Placement::Root),
            ],
        );

        let component_calls = shared(0usize);
        let mut scheduler = ProcessScheduler::new();
        let calls_cb = component_calls.clone();
        scheduler.start_components(
            repo,
            ComponentBatchDescriptor {
                config: ProcessConfig::new(ExecutionPolicy::Blocking),
                mode: ComponentBatchMode::Components,
                search,
                component_predicate: Box::new(|c: &FakeComponent| c.type_name == "Collider"),
                on_component: Some(Box::new(move |_component, _meta, _pos| {
                    *calls_cb.lock().unwrap() += 1;
                })),
                ..ComponentBatchDescriptor::default()
            },
        );
        scheduler.tick();

        assert_eq!(
            *component_calls.lock().unwrap(),
            expected,
            "search type {search:?}"
        );
    }
}

#[test]
fn component_mode_yields_one_step_per_matched_component() {
    let mut repo = MemoryRepository::default();
    repo.push(
        "rig",
        true,
        vec![
            collider(Placement::Root),
            collider(Placement::ActiveChild),
            collider(Placement::InactiveChild),
        ],
    );

    let component_calls = shared(0usize);
    let calls_cb = component_calls.clone();
    let mut enumeration = ComponentEnumeration::new(
        repo,
        ComponentBatchDescriptor {
            config: ProcessConfig::new(ExecutionPolicy::Async),
            mode: ComponentBatchMode::Components,
            search: ComponentSearchType::AllChildren,
            on_component: Some(Box::new(move |_component, _meta, _pos| {
                *calls_cb.lock().unwrap() += 1;
            })),
            ..ComponentBatchDescriptor::default()
        },
    );

    // Expansion plus first component, then one step per remaining component.
    assert!(matches!(enumeration.advance(), StepSignal::Advanced(_)));
    assert_eq!(*component_calls.lock().unwrap(), 1);
    assert!(matches!(enumeration.advance(), StepSignal::Advanced(_)));
    assert_eq!(*component_calls.lock().unwrap(), 2);
    assert!(matches!(enumeration.advance(), StepSignal::Advanced(_)));
    assert_eq!(*component_calls.lock().unwrap(), 3);
    assert!(matches!(enumeration.advance(), StepSignal::Done));
    assert_eq!(*component_calls.lock().unwrap(), 3);
}

#[test]
fn containers_without_components_still_consume_a_step() {
    let mut repo = MemoryRepository::default();
    repo.push("empty_container", true, Vec::new());
    repo.push("rig", true, vec![collider(Placement::Root)]);

    let matched = shared(Vec::<String>::new());
    let matched_cb = matched.clone();
    let mut enumeration = ComponentEnumeration::new(
        repo,
        ComponentBatchDescriptor {
            config: ProcessConfig::default(),
            mode: ComponentBatchMode::Components,
            search: ComponentSearchType::AllChildren,
            on_component: Some(Box::new(move |_component, meta, _pos| {
                matched_cb.lock().unwrap().push(meta.name.clone());
            })),
            ..ComponentBatchDescriptor::default()
        },
    );

    assert!(matches!(enumeration.advance(), StepSignal::Advanced(_)));
    assert!(matched.lock().unwrap().is_empty());
    assert!(matches!(enumeration.advance(), StepSignal::Advanced(_)));
    assert_eq!(*matched.lock().unwrap(), vec!["rig"]);
    assert!(matches!(enumeration.advance(), StepSignal::Done));
}
