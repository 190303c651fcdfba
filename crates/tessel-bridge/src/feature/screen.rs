/// Decides per frame whether the overlay may stay visible, based on the name
/// of the host screen currently on top.
///
/// The overlay lives on the home screen. Passthrough screens (toasts, debug
/// output) may appear on top of it without hiding the overlay, but only when
/// entered directly from the home screen. Any other screen hides it.
#[derive(Debug, Clone)]
pub struct ScreenGate {
    home: String,
    passthrough: Vec<String>,
    last_screen: Option<String>,
}

impl Default for ScreenGate {
    fn default() -> Self {
        Self::new("hud_screen", ["toast_screen", "debug_screen"])
    }
}

impl ScreenGate {
    pub fn new<S: Into<String>>(home: impl Into<String>, passthrough: impl IntoIterator<Item = S>) -> Self {
        Self {
            home: home.into(),
            passthrough: passthrough.into_iter().map(Into::into).collect(),
            last_screen: None,
        }
    }

    /// The screen remembered from earlier frames. Passthrough screens are
    /// not remembered while they keep the overlay visible.
    pub fn last_screen(&self) -> Option<&str> {
        self.last_screen.as_deref()
    }

    /// Feeds the current screen; returns true when the overlay may render.
    pub fn observe(&mut self, current: &str) -> bool {
        let last = self.last_screen.get_or_insert_with(|| current.to_owned());

        if current == self.home {
            if *last != self.home {
                last.clone_from(&self.home);
            }
            return true;
        }

        if *last == self.home && self.passthrough.iter().any(|s| s == current) {
            return true;
        }

        if *last != current {
            log::debug!("overlay hidden on screen {current:?}");
            current.clone_into(last);
        }
        false
    }
}
