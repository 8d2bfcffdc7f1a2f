//! Scripted fakes shared by the integration tests.
#![allow(dead_code)]

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use sightfront::overlay::{
    CapabilityError, CapabilityProvider, HostContext, OverlayCapability, SettingsLauncher,
};

/// One recorded call into a fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Acquire,
    Bind(String),
    Render {
        style: String,
        color: String,
        size: u32,
        thickness: u32,
        show_center_dot: bool,
        opacity: f64,
    },
    StopRendering,
    HasPermission,
    RequestPermission,
    Teardown,
    OpenSettings(String),
}

impl Call {
    /// Everything except provider probing and settings, i.e. calls on the
    /// surface itself.
    pub fn is_surface_call(&self) -> bool {
        !matches!(self, Call::Acquire | Call::OpenSettings(_))
    }
}

/// How a fake misbehaves.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub granted: bool,
    pub unavailable: bool,
    pub fail_bind: bool,
    pub bind_silently_fails: bool,
    pub fail_render: bool,
    pub panic_render: bool,
    pub fail_stop: bool,
    pub fail_permission_query: bool,
    /// `None`: the surface has no direct request entry point.
    pub direct_request: Option<Result<(), String>>,
    pub fail_teardown: bool,
    pub fail_settings: bool,
}

/// Shared handle onto the call log and the script.
#[derive(Clone, Default)]
pub struct Fake {
    log: Rc<RefCell<Vec<Call>>>,
    script: Rc<RefCell<Script>>,
}

impl Fake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn granted() -> Self {
        let fake = Self::new();
        fake.script().granted = true;
        fake
    }

    pub fn script(&self) -> RefMut<'_, Script> {
        self.script.borrow_mut()
    }

    pub fn provider(&self) -> FakeProvider {
        FakeProvider { fake: self.clone() }
    }

    pub fn launcher(&self) -> FakeLauncher {
        FakeLauncher { fake: self.clone() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn surface_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_surface_call)
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.log.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

pub struct FakeProvider {
    fake: Fake,
}

impl CapabilityProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn acquire(&self) -> Option<Box<dyn OverlayCapability>> {
        self.fake.record(Call::Acquire);
        if self.fake.script.borrow().unavailable {
            return None;
        }
        Some(Box::new(FakeSurface {
            fake: self.fake.clone(),
            bound: false,
        }))
    }
}

pub struct FakeSurface {
    fake: Fake,
    bound: bool,
}

fn native(message: &str) -> CapabilityError {
    CapabilityError::Native(message.to_string())
}

impl OverlayCapability for FakeSurface {
    fn bind(&mut self, host: &HostContext) -> Result<(), CapabilityError> {
        self.fake.record(Call::Bind(host.app_id.clone()));
        let script = self.fake.script.borrow().clone();
        if script.fail_bind {
            return Err(native("bind refused"));
        }
        self.bound = !script.bind_silently_fails;
        Ok(())
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    fn render(
        &mut self,
        style: &str,
        color: &str,
        size: u32,
        thickness: u32,
        show_center_dot: bool,
        opacity: f64,
    ) -> Result<(), CapabilityError> {
        self.fake.record(Call::Render {
            style: style.to_string(),
            color: color.to_string(),
            size,
            thickness,
            show_center_dot,
            opacity,
        });
        let script = self.fake.script.borrow().clone();
        if script.panic_render {
            panic!("surface exploded");
        }
        if script.fail_render {
            return Err(native("window gone"));
        }
        Ok(())
    }

    fn stop_rendering(&mut self) -> Result<(), CapabilityError> {
        self.fake.record(Call::StopRendering);
        if self.fake.script.borrow().fail_stop {
            return Err(native("cannot remove view"));
        }
        Ok(())
    }

    fn has_overlay_permission(&self) -> Result<bool, CapabilityError> {
        self.fake.record(Call::HasPermission);
        let script = self.fake.script.borrow();
        if script.fail_permission_query {
            return Err(native("settings provider crashed"));
        }
        Ok(script.granted)
    }

    fn request_overlay_permission(&mut self) -> Result<(), CapabilityError> {
        self.fake.record(Call::RequestPermission);
        match self.fake.script.borrow().direct_request.clone() {
            None => Err(CapabilityError::Unsupported),
            Some(Ok(())) => Ok(()),
            Some(Err(message)) => Err(CapabilityError::Native(message)),
        }
    }

    fn teardown(&mut self) -> Result<(), CapabilityError> {
        self.fake.record(Call::Teardown);
        self.bound = false;
        if self.fake.script.borrow().fail_teardown {
            return Err(native("teardown failed"));
        }
        Ok(())
    }
}

pub struct FakeLauncher {
    fake: Fake,
}

impl SettingsLauncher for FakeLauncher {
    fn open_app_settings(&self, host: &HostContext) -> Result<(), CapabilityError> {
        self.fake.record(Call::OpenSettings(host.settings_target()));
        if self.fake.script.borrow().fail_settings {
            return Err(native("no settings app"));
        }
        Ok(())
    }
}

/// The render call a default config produces.
pub fn default_render() -> Call {
    Call::Render {
        style: "cross".to_string(),
        color: "#00FF00".to_string(),
        size: 20,
        thickness: 1,
        show_center_dot: true,
        opacity: 0.8,
    }
}
