//! The "high iteration count" warning: fades in, holds, fades out. Restarting
//! it while it is still showing starts the curve over.

pub const WARNING_TOTAL_SECS: f64 = 4.0;
pub const WARNING_FADE_SECS: f64 = 0.25;

/// Opacity of the warning `elapsed` seconds after it was (re)started.
pub fn fade_alpha(elapsed: f64) -> f64 {
    if elapsed > WARNING_TOTAL_SECS - WARNING_FADE_SECS {
        ((WARNING_TOTAL_SECS - elapsed) / WARNING_FADE_SECS).max(0.0)
    } else if elapsed > WARNING_FADE_SECS {
        1.0
    } else {
        (elapsed / WARNING_FADE_SECS).max(0.0)
    }
}

/// What the UI should draw for the warning right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarningState {
    pub visible: bool,
    pub alpha: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WarningFade {
    elapsed: Option<f64>,
}

impl WarningFade {
    /// Starts the fade from zero, replacing any fade already running.
    pub fn start(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn clear(&mut self) {
        self.elapsed = None;
    }

    pub fn advance(&mut self, dt: f64) {
        if let Some(elapsed) = self.elapsed {
            let elapsed = elapsed + dt.max(0.0);
            self.elapsed = if elapsed > WARNING_TOTAL_SECS {
                None
            } else {
                Some(elapsed)
            };
        }
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn state(&self) -> WarningState {
        match self.elapsed {
            Some(elapsed) => WarningState {
                visible: true,
                alpha: fade_alpha(elapsed),
            },
            None => WarningState {
                visible: false,
                alpha: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_curve() {
        assert_eq!(fade_alpha(0.0), 0.0);
        assert!((fade_alpha(0.125) - 0.5).abs() < 1e-12);
        assert_eq!(fade_alpha(0.3), 1.0);
        assert_eq!(fade_alpha(2.0), 1.0);
        assert!((fade_alpha(3.875) - 0.5).abs() < 1e-12);
        assert_eq!(fade_alpha(4.0), 0.0);
    }

    #[test]
    fn test_fade_runs_out() {
        let mut fade = WarningFade::default();
        assert!(!fade.state().visible);
        fade.start();
        fade.advance(1.0);
        assert_eq!(fade.state(), WarningState { visible: true, alpha: 1.0 });
        fade.advance(3.0);
        assert!(fade.is_active());
        fade.advance(0.01);
        assert!(!fade.is_active());
        assert_eq!(fade.state().alpha, 0.0);
    }

    #[test]
    fn test_restart_supersedes() {
        let mut fade = WarningFade::default();
        fade.start();
        fade.advance(3.9);
        fade.start();
        fade.advance(0.125);
        assert!((fade.state().alpha - 0.5).abs() < 1e-12);
        fade.advance(3.0);
        assert!(fade.is_active());
    }

    #[test]
    fn test_clear() {
        let mut fade = WarningFade::default();
        fade.start();
        fade.advance(1.0);
        fade.clear();
        assert!(!fade.state().visible);
    }
}
