//! Behaviour-driven tests for the plugin session lifecycle.

use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

use quill_config::Config;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

use crate::editor::EditorHandle;
use crate::error::PluginError;
use crate::host::PluginHost;
use crate::plugin::Plugin;
use crate::session::SessionRef;

use super::support::{CountingSession, RecordingPlugin};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

struct TestWorld {
    runtime: Runtime,
    config: Config,
    host: Option<PluginHost>,
    plugins: HashMap<String, Arc<RecordingPlugin>>,
    editor: Option<EditorHandle>,
    sessions: Vec<SessionRef<CountingSession>>,
    registration: Option<Result<(), PluginError>>,
}

impl TestWorld {
    fn new() -> Self {
        Self {
            runtime: Builder::new_current_thread()
                .build()
                .expect("build test runtime"),
            config: Config::default(),
            host: None,
            plugins: HashMap::new(),
            editor: None,
            sessions: Vec::new(),
            registration: None,
        }
    }

    fn host(&mut self) -> &mut PluginHost {
        let config = self.config.clone();
        self.host.get_or_insert_with(|| PluginHost::new(config))
    }

    fn plugin(&self, name: &str) -> Arc<RecordingPlugin> {
        Arc::clone(self.plugins.get(name).expect("plugin registered"))
    }

    fn editor(&self) -> &EditorHandle {
        self.editor.as_ref().expect("editor attached")
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::new()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a configuration disabling plugin {name}")]
fn given_disabled(world: &mut TestWorld, name: String) {
    world.config = Config::default().with_disabled_plugin(name.trim_matches('"'));
}

#[given("a host with a plugin {name}")]
fn given_host_with_plugin(world: &mut TestWorld, name: String) {
    let plugin_name = name.trim_matches('"').to_owned();
    let plugin = Arc::new(RecordingPlugin::new(&plugin_name));
    world
        .host()
        .register(Arc::clone(&plugin))
        .expect("register plugin");
    world.plugins.insert(plugin_name, plugin);
}

#[given("an attached editor")]
fn given_attached_editor(world: &mut TestWorld) {
    let runtime = world.runtime.handle().clone();
    let editor = world.host().attach_editor(runtime);
    world.editor = Some(editor);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("plugin {name} is registered")]
fn when_registered(world: &mut TestWorld, name: String) {
    let plugin = Arc::new(RecordingPlugin::new(name.trim_matches('"')));
    let result = world.host().register(plugin);
    world.registration = Some(result);
}

#[when("plugin {name} opens a session for the editor")]
fn when_open_session(world: &mut TestWorld, name: String) {
    let plugin = world.plugin(name.trim_matches('"'));
    let session = plugin.get_or_open_session(world.editor());
    world.sessions.push(session);
}

#[when("the editor is destroyed")]
fn when_editor_destroyed(world: &mut TestWorld) {
    let editor = world.editor().clone();
    world.host().destroy_editor(&editor);
}

#[when("{threads} threads open sessions with plugin {name} for the editor")]
fn when_concurrent_lookups(world: &mut TestWorld, threads: usize, name: String) {
    let plugin = world.plugin(name.trim_matches('"'));
    let editor = world.editor().clone();
    let barrier = Barrier::new(threads);
    let sessions: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..threads)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    plugin.get_or_open_session(&editor)
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("lookup thread"))
            .collect()
    });
    world.sessions.extend(sessions);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the session has been released {count} time(s)")]
fn then_released(world: &mut TestWorld, count: usize) {
    let session = world.sessions.first().expect("session opened");
    assert_eq!(session.releases(), count);
}

#[then("the editor's work is cancelled")]
fn then_cancelled(world: &mut TestWorld) {
    assert!(world.editor().scheduling().is_cancelled());
    let session = world.sessions.first().expect("session opened");
    assert!(session.scope().is_cancelled());
}

#[then("every thread received the same session")]
fn then_same_session(world: &mut TestWorld) {
    let first = world.sessions.first().expect("sessions opened");
    assert!(
        world
            .sessions
            .iter()
            .all(|session| Arc::ptr_eq(session, first)),
        "threads observed different sessions"
    );
}

#[then("plugin {name} holds {count} session(s)")]
fn then_session_count(world: &mut TestWorld, name: String, count: usize) {
    let plugin = world.plugin(name.trim_matches('"'));
    assert_eq!(plugin.sessions().len(), count);
}

#[then("registration fails with {error_kind}")]
fn then_registration_fails(world: &mut TestWorld, error_kind: String) {
    let err = world
        .registration
        .as_ref()
        .expect("no registration attempted")
        .as_ref()
        .expect_err("expected registration to fail");
    match error_kind.trim_matches('"') {
        "disabled" => assert!(
            matches!(err, PluginError::Disabled { .. }),
            "expected Disabled, got: {err}"
        ),
        "duplicate" => assert!(
            matches!(err, PluginError::Duplicate { .. }),
            "expected Duplicate, got: {err}"
        ),
        other => panic!("unsupported error kind: '{other}' (supported: disabled, duplicate)"),
    }
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/plugin_lifecycle.feature", index = 0)]
fn destroying_an_editor_releases_sessions(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/plugin_lifecycle.feature", index = 1)]
fn destroying_twice_releases_once(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/plugin_lifecycle.feature", index = 2)]
fn concurrent_lookups_share_one_session(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/plugin_lifecycle.feature", index = 3)]
fn disabled_plugins_are_refused(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/plugin_lifecycle.feature", index = 4)]
fn duplicate_plugins_are_refused(world: TestWorld) {
    let _ = world;
}
