use graph_core::{Camera, GraphConfig, ORBIT_STEP_RADIANS, RESOLUTION_STEP};
use winit::keyboard::{Key, NamedKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    ResolutionUp,
    ResolutionDown,
    NextFunction,
    ToggleMode,
    OrbitLeft,
    OrbitRight,
    Quit,
}

pub(crate) fn control_for_key(key: &Key) -> Option<Control> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some(Control::ResolutionUp),
        Key::Named(NamedKey::ArrowDown) => Some(Control::ResolutionDown),
        Key::Named(NamedKey::ArrowLeft) => Some(Control::OrbitLeft),
        Key::Named(NamedKey::ArrowRight) => Some(Control::OrbitRight),
        Key::Named(NamedKey::Space) => Some(Control::NextFunction),
        Key::Named(NamedKey::Escape) => Some(Control::Quit),
        Key::Character(c) if c.eq_ignore_ascii_case("m") => Some(Control::ToggleMode),
        _ => None,
    }
}

/// Apply an interactive edit. Edits stay inside the valid config ranges, so no
/// validation is needed before the next frame.
pub(crate) fn apply(control: Control, config: &mut GraphConfig, camera: &mut Camera) {
    match control {
        Control::ResolutionUp => config.nudge_resolution(RESOLUTION_STEP as i32),
        Control::ResolutionDown => config.nudge_resolution(-(RESOLUTION_STEP as i32)),
        Control::NextFunction => config.function = config.function.next(),
        Control::ToggleMode => config.transition_mode = config.transition_mode.toggled(),
        Control::OrbitLeft => camera.orbit(-ORBIT_STEP_RADIANS),
        Control::OrbitRight => camera.orbit(ORBIT_STEP_RADIANS),
        Control::Quit => return,
    }
    log::info!(
        "resolution {} | function {} | mode {}",
        config.resolution,
        config.function,
        config.transition_mode
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::{FunctionName, TransitionMode, MAX_RESOLUTION};

    #[test]
    fn maps_keys_to_controls() {
        assert_eq!(
            control_for_key(&Key::Named(NamedKey::Space)),
            Some(Control::NextFunction)
        );
        assert_eq!(
            control_for_key(&Key::Character("M".into())),
            Some(Control::ToggleMode)
        );
        assert_eq!(control_for_key(&Key::Character("q".into())), None);
    }

    #[test]
    fn edits_stay_in_range() {
        let mut config = GraphConfig {
            resolution: MAX_RESOLUTION - 5,
            ..GraphConfig::default()
        };
        let mut camera = Camera::new(1.0);
        apply(Control::ResolutionUp, &mut config, &mut camera);
        assert_eq!(config.resolution, MAX_RESOLUTION);
        apply(Control::NextFunction, &mut config, &mut camera);
        assert_eq!(config.function, FunctionName::MultiWave);
        apply(Control::ToggleMode, &mut config, &mut camera);
        assert_eq!(config.transition_mode, TransitionMode::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn orbit_moves_the_eye() {
        let mut config = GraphConfig::default();
        let mut camera = Camera::new(1.0);
        let before = camera.eye;
        apply(Control::OrbitLeft, &mut config, &mut camera);
        assert_ne!(camera.eye, before);
        apply(Control::OrbitRight, &mut config, &mut camera);
        assert!(camera.eye.abs_diff_eq(before, 1e-5));
    }
}
