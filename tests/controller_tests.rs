//! Tests for the overlay lifecycle controller against a scripted surface.

mod common;

use common::{default_render, Call, Fake};
use sightfront::overlay::{
    HostContext, InitOutcome, LifecycleState, OverlayController, OverlayError, PermissionRequest,
    RemediationKind, SystemSettingsLauncher,
};
use sightfront::{SightConfig, SightStyle};

fn controller(fake: &Fake) -> OverlayController {
    OverlayController::new(fake.provider(), HostContext::new("com.test.sight"))
        .with_settings_launcher(fake.launcher())
}

fn initialized(fake: &Fake) -> OverlayController {
    let mut c = controller(fake);
    assert_eq!(c.init(), Ok(InitOutcome::Bound));
    fake.clear();
    c
}

// === init ===

#[test]
fn init_binds_with_host_id() {
    let fake = Fake::new();
    let mut c = controller(&fake);
    assert_eq!(c.init(), Ok(InitOutcome::Bound));
    assert_eq!(c.state(), LifecycleState::Initialized);
    assert!(c.is_bound());
    assert_eq!(
        fake.calls(),
        [Call::Acquire, Call::Bind("com.test.sight".to_string())]
    );
    assert_eq!(c.host().app_id, "com.test.sight");
}

#[test]
fn second_init_binds_once() {
    let fake = Fake::new();
    let mut c = controller(&fake);
    c.init().unwrap();
    assert_eq!(c.init(), Ok(InitOutcome::AlreadyBound));
    assert_eq!(fake.count(|c| matches!(c, Call::Acquire)), 1);
    assert_eq!(fake.count(|c| matches!(c, Call::Bind(_))), 1);
    assert!(c.is_bound());
}

#[test]
fn missing_capability_is_reported_not_fatal() {
    let fake = Fake::new();
    fake.script().unavailable = true;
    let mut c = controller(&fake);

    let err = c.init().unwrap_err();
    assert!(matches!(err, OverlayError::CapabilityUnavailable { .. }));
    assert_eq!(c.state(), LifecycleState::Uninitialized);
    assert!(!c.is_bound());
}

#[test]
fn bind_failure_leaves_controller_uninitialized() {
    let fake = Fake::new();
    fake.script().fail_bind = true;
    let mut c = controller(&fake);

    let err = c.init().unwrap_err();
    assert_eq!(err.operation(), Some("init"));
    assert_eq!(c.state(), LifecycleState::Uninitialized);

    // Retry once the surface behaves.
    fake.script().fail_bind = false;
    assert_eq!(c.init(), Ok(InitOutcome::Bound));
}

#[test]
fn bind_without_binding_is_a_native_failure() {
    let fake = Fake::new();
    fake.script().bind_silently_fails = true;
    let mut c = controller(&fake);
    assert!(matches!(
        c.init(),
        Err(OverlayError::NativeCallFailed { operation: "init", .. })
    ));
    assert_eq!(c.state(), LifecycleState::Uninitialized);
    assert_eq!(
        fake.calls(),
        [
            Call::Acquire,
            Call::Bind("com.test.sight".to_string()),
            Call::Teardown,
        ]
    );
}

// === permission ===

#[test]
fn check_permission_without_binding_is_false() {
    let fake = Fake::granted();
    let mut c = controller(&fake);
    assert!(!c.check_permission());
    assert!(fake.surface_calls().is_empty());
    assert_eq!(c.state(), LifecycleState::Uninitialized);
}

#[test]
fn check_permission_records_the_observation() {
    let fake = Fake::new();
    let mut c = initialized(&fake);

    assert!(!c.check_permission());
    assert_eq!(c.state(), LifecycleState::PermissionDenied);

    fake.script().granted = true;
    assert!(c.check_permission());
    assert_eq!(c.state(), LifecycleState::PermissionGranted);
}

#[test]
fn check_permission_does_not_leave_showing() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();

    fake.script().granted = false;
    assert!(!c.check_permission());
    assert_eq!(c.state(), LifecycleState::Showing);
}

#[test]
fn failing_permission_query_reads_as_denied() {
    let fake = Fake::granted();
    fake.script().fail_permission_query = true;
    let mut c = initialized(&fake);
    assert!(!c.check_permission());
}

#[test]
fn request_permission_when_granted_does_nothing() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    assert_eq!(c.request_permission(), Ok(PermissionRequest::AlreadyGranted));
    assert_eq!(fake.calls(), [Call::HasPermission]);
}

#[test]
fn request_permission_prefers_direct_request() {
    let fake = Fake::new();
    fake.script().direct_request = Some(Ok(()));
    let mut c = initialized(&fake);

    assert_eq!(
        c.request_permission(),
        Ok(PermissionRequest::Requested(RemediationKind::DirectRequest))
    );
    assert_eq!(fake.count(|c| matches!(c, Call::OpenSettings(_))), 0);
}

#[test]
fn request_permission_falls_back_to_settings() {
    let fake = Fake::new();
    let mut c = initialized(&fake);

    assert_eq!(
        c.request_permission(),
        Ok(PermissionRequest::Requested(RemediationKind::AppSettings))
    );
    assert_eq!(
        fake.calls(),
        [
            Call::HasPermission,
            Call::RequestPermission,
            Call::OpenSettings("package:com.test.sight".to_string()),
        ]
    );
}

#[test]
fn request_permission_surfaces_the_last_failure() {
    let fake = Fake::new();
    fake.script().direct_request = Some(Err("dialog blocked".to_string()));
    fake.script().fail_settings = true;
    let mut c = initialized(&fake);

    let err = c.request_permission().unwrap_err();
    assert_eq!(
        err,
        OverlayError::NativeCallFailed {
            operation: "open_app_settings",
            message: "no settings app".to_string(),
        }
    );
}

#[cfg(unix)]
#[test]
fn failing_system_opener_is_surfaced() {
    let fake = Fake::new();
    let mut c = OverlayController::new(fake.provider(), HostContext::new("com.test.sight"))
        .with_settings_launcher(SystemSettingsLauncher::with_program("false"));
    c.init().unwrap();

    match c.request_permission() {
        Err(OverlayError::NativeCallFailed { operation, message }) => {
            assert_eq!(operation, "open_app_settings");
            assert!(message.contains("opener exited with"), "{message}");
        }
        other => panic!("expected the opener failure, got {other:?}"),
    }
}

#[test]
fn request_permission_uses_custom_chain() {
    let fake = Fake::new();
    let mut c = initialized(&fake).with_strategies(vec![RemediationKind::AppSettings]);
    assert_eq!(
        c.request_permission(),
        Ok(PermissionRequest::Requested(RemediationKind::AppSettings))
    );
    assert_eq!(fake.count(|c| matches!(c, Call::RequestPermission)), 0);
}

#[test]
fn request_permission_never_waits_for_the_grant() {
    let fake = Fake::new();
    let mut c = initialized(&fake);
    c.request_permission().unwrap();
    assert!(!c.check_permission());
    assert_eq!(c.state(), LifecycleState::PermissionDenied);
}

// === show / update ===

#[test]
fn show_before_init_makes_no_native_call() {
    let fake = Fake::granted();
    let mut c = controller(&fake);
    let err = c.show(&SightConfig::default()).unwrap_err();
    assert_eq!(
        err,
        OverlayError::InvalidStateTransition {
            operation: "show",
            state: LifecycleState::Uninitialized,
        }
    );
    assert!(fake.calls().is_empty());
}

#[test]
fn show_forwards_exact_primitives_even_when_denied() {
    let fake = Fake::new();
    let mut c = initialized(&fake);
    assert!(!c.check_permission());

    c.show(&SightConfig::default()).unwrap();
    assert_eq!(fake.calls().last(), Some(&default_render()));
    assert_eq!(c.state(), LifecycleState::Showing);
    assert_eq!(c.current_config(), Some(&SightConfig::default()));
}

#[test]
fn invalid_config_never_reaches_the_surface() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    let config = SightConfig {
        color: "green".to_string(),
        ..SightConfig::default()
    };

    let err = c.show(&config).unwrap_err();
    assert!(matches!(err, OverlayError::InvalidConfig(_)));
    assert!(fake.calls().is_empty());
    assert_eq!(c.state(), LifecycleState::Initialized);
    assert_eq!(c.current_config(), None);
}

#[test]
fn render_error_is_reported_for_show() {
    let fake = Fake::granted();
    fake.script().fail_render = true;
    let mut c = initialized(&fake);

    let err = c.show(&SightConfig::default()).unwrap_err();
    assert_eq!(
        err,
        OverlayError::NativeCallFailed {
            operation: "show",
            message: "window gone".to_string(),
        }
    );
    assert_eq!(c.state(), LifecycleState::Initialized);
    assert_eq!(c.current_config(), None);
}

#[test]
fn render_panic_is_reported_for_show() {
    let fake = Fake::granted();
    fake.script().panic_render = true;
    let mut c = initialized(&fake);

    match c.show(&SightConfig::default()) {
        Err(OverlayError::NativeCallFailed { operation, message }) => {
            assert_eq!(operation, "show");
            assert!(message.contains("surface exploded"), "{message}");
        }
        other => panic!("expected a native failure, got {other:?}"),
    }

    // The controller stays usable.
    fake.script().panic_render = false;
    assert!(c.show(&SightConfig::default()).is_ok());
}

#[test]
fn failed_update_keeps_the_previous_config() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();

    fake.script().fail_render = true;
    let bigger = SightConfig {
        size: 60,
        ..SightConfig::default()
    };
    let err = c.update(&bigger).unwrap_err();
    assert_eq!(err.operation(), Some("update"));
    assert_eq!(c.current_config(), Some(&SightConfig::default()));
    assert_eq!(c.state(), LifecycleState::Showing);
}

#[test]
fn update_replaces_the_whole_config() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();

    let dot = SightConfig {
        style: SightStyle::Dot,
        color: "#ff0000".to_string(),
        show_center_dot: false,
        ..SightConfig::default()
    };
    c.update(&dot).unwrap();
    assert_eq!(c.current_config(), Some(&dot));
    assert_eq!(
        fake.calls().last(),
        Some(&Call::Render {
            style: "dot".to_string(),
            color: "#ff0000".to_string(),
            size: 20,
            thickness: 1,
            show_center_dot: false,
            opacity: 0.8,
        })
    );
}

#[test]
fn update_from_hidden_shows_again() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();
    c.hide().unwrap();

    c.update(&SightConfig::default()).unwrap();
    assert_eq!(c.state(), LifecycleState::Showing);
}

#[test]
fn update_before_init_is_rejected() {
    let fake = Fake::granted();
    let mut c = controller(&fake);
    assert!(matches!(
        c.update(&SightConfig::default()),
        Err(OverlayError::InvalidStateTransition { operation: "update", .. })
    ));
}

// === hide ===

#[test]
fn second_hide_is_a_no_op() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();

    c.hide().unwrap();
    assert_eq!(c.state(), LifecycleState::Hidden);
    let calls = fake.calls().len();

    c.hide().unwrap();
    assert_eq!(c.state(), LifecycleState::Hidden);
    assert_eq!(fake.calls().len(), calls);
}

#[test]
fn hide_before_show_touches_nothing() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.hide().unwrap();
    assert_eq!(c.state(), LifecycleState::Initialized);
    assert!(fake.calls().is_empty());
}

#[test]
fn hide_failure_keeps_showing() {
    let fake = Fake::granted();
    fake.script().fail_stop = true;
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();

    assert_eq!(c.hide().unwrap_err().operation(), Some("hide"));
    assert_eq!(c.state(), LifecycleState::Showing);
}

#[test]
fn hide_before_init_is_rejected() {
    let fake = Fake::new();
    let mut c = controller(&fake);
    assert!(matches!(
        c.hide(),
        Err(OverlayError::InvalidStateTransition { operation: "hide", .. })
    ));
}

// === release ===

#[test]
fn release_is_terminal() {
    let fake = Fake::granted();
    let mut c = initialized(&fake);
    c.show(&SightConfig::default()).unwrap();

    c.release().unwrap();
    assert_eq!(c.state(), LifecycleState::Released);
    assert_eq!(c.current_config(), None);
    assert!(!c.is_bound());
    assert_eq!(fake.count(|c| matches!(c, Call::Teardown)), 1);
    fake.clear();

    let config = SightConfig::default();
    for err in [
        c.show(&config).unwrap_err(),
        c.update(&config).unwrap_err(),
        c.hide().unwrap_err(),
        c.init().unwrap_err(),
        c.request_permission().unwrap_err(),
    ] {
        assert!(
            matches!(
                err,
                OverlayError::InvalidStateTransition {
                    state: LifecycleState::Released,
                    ..
                }
            ),
            "{err:?}"
        );
    }
    assert!(!c.check_permission());
    assert!(fake.calls().is_empty());
}

#[test]
fn release_twice_tears_down_once() {
    let fake = Fake::new();
    let mut c = initialized(&fake);
    c.release().unwrap();
    c.release().unwrap();
    assert_eq!(fake.count(|c| matches!(c, Call::Teardown)), 1);
}

#[test]
fn release_before_init_is_allowed() {
    let fake = Fake::new();
    let mut c = controller(&fake);
    assert_eq!(c.release(), Ok(()));
    assert_eq!(c.state(), LifecycleState::Released);
    assert!(fake.calls().is_empty());
}

#[test]
fn teardown_failure_still_releases() {
    let fake = Fake::new();
    fake.script().fail_teardown = true;
    let mut c = initialized(&fake);

    let err = c.release().unwrap_err();
    assert_eq!(err.operation(), Some("release"));
    assert_eq!(c.state(), LifecycleState::Released);
    assert_eq!(c.release(), Ok(()));
}

#[test]
fn drop_releases_the_surface() {
    let fake = Fake::new();
    {
        let _c = initialized(&fake);
    }
    assert_eq!(fake.calls(), [Call::Teardown]);
}

#[test]
fn drop_after_release_does_not_tear_down_again() {
    let fake = Fake::new();
    {
        let mut c = initialized(&fake);
        c.release().unwrap();
    }
    assert_eq!(fake.count(|c| matches!(c, Call::Teardown)), 1);
}
