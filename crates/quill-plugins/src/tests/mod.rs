//! Crate-level integration and BDD tests.

use std::sync::Arc;

use quill_config::Config;
use tokio::runtime::Builder;

use crate::event::{EventKind, EventOutcome, KeyAction, KeyEvent, KeyInput, PluginEvent};
use crate::host::PluginHost;
use crate::plugin::Plugin;

pub(crate) mod support;

mod behaviour;

use support::RecordingPlugin;

#[test]
fn end_to_end_editor_lifecycle() {
    let runtime = Builder::new_current_thread()
        .build()
        .expect("build test runtime");
    let completion = Arc::new(
        RecordingPlugin::new("completion")
            .subscribed_to(EventKind::Key)
            .handling(),
    );
    let mut host = PluginHost::new(Config::default());
    host.register(Arc::clone(&completion)).expect("register");

    let editor = host.attach_editor(runtime.handle().clone());
    let session = completion.get_or_open_session(&editor);
    let event: PluginEvent = KeyEvent::new(KeyInput::new(32, KeyAction::Down), editor.clone()).into();
    assert_eq!(host.dispatch(&event), EventOutcome::Handled);

    assert!(host.destroy_editor(&editor));
    assert_eq!(session.releases(), 1);
    assert!(editor.scheduling().is_cancelled());
    assert_eq!(host.dispatch(&event), EventOutcome::Ignored);
    assert_eq!(completion.events(), 1);
}
