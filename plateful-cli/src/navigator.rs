use plateful_core::{FavoriteIcon, HeaderAction, Navigator};

/// Stands in for a navigation stack: remembers the header it was given and
/// whether the screen asked to be left.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    header: Option<FavoriteIcon>,
    left: bool,
}

impl TerminalNavigator {
    pub const fn header(&self) -> Option<FavoriteIcon> {
        self.header
    }

    pub const fn has_left(&self) -> bool {
        self.left
    }
}

impl Navigator for TerminalNavigator {
    fn go_back(&mut self) {
        log::debug!("navigator: back");
        self.left = true;
    }

    fn set_header_action(&mut self, action: HeaderAction) {
        log::debug!("navigator: header icon {}", action.icon.as_str());
        self.header = Some(action.icon);
    }
}
