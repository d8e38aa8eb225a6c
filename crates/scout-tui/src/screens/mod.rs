//! Screen components, one per [`ScreenId`].

mod control;
mod login;

use url::Url;

use scout_core::LoginGate;

use crate::component::Component;
use crate::screen::ScreenId;

/// Build all screens for the app.
pub fn create_screens(gate: LoginGate, video_url: Url) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Login, Box::new(login::LoginScreen::new(gate))),
        (
            ScreenId::Control,
            Box::new(control::ControlScreen::new(video_url)),
        ),
    ]
}
