pub const SHOW_MENU_CLASS: &str = "show-menu";
pub const ICON_OPEN: &str = "fa-bars";
pub const ICON_CLOSE: &str = "fa-times";

/// Mobile navigation menu open/closed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu, returning whether it is now open
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// `(old, new)` icon classes for the toggle button
    pub fn icon_swap(&self) -> (&'static str, &'static str) {
        if self.open {
            (ICON_OPEN, ICON_CLOSE)
        } else {
            (ICON_CLOSE, ICON_OPEN)
        }
    }
}

/// In-page anchor of a nav link, e.g. `#services`
pub fn anchor_target(href: &str) -> Option<&str> {
    href.starts_with('#').then_some(href).filter(|h| h.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_swaps_icon() {
        let mut menu = NavMenu::default();
        assert!(!menu.is_open());

        assert!(menu.toggle());
        assert_eq!(menu.icon_swap(), (ICON_OPEN, ICON_CLOSE));

        assert!(!menu.toggle());
        assert_eq!(menu.icon_swap(), (ICON_CLOSE, ICON_OPEN));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut menu = NavMenu::default();
        menu.toggle();
        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#contact"), Some("#contact"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about.html"), None);
        assert_eq!(anchor_target("tel:5551234567"), None);
    }
}
