/// Scroll offset at which the header gets its solid background
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;
/// Scroll offset at which the back-to-top button appears
pub const SCROLL_UP_THRESHOLD: f64 = 400.0;
/// Sections count as active this far before their top edge
pub const SECTION_LEAD: f64 = 150.0;

/// Class toggles driven by the vertical scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub header_scrolled: bool,
    pub show_scroll_up: bool,
}

impl ScrollState {
    pub fn at(scroll_y: f64) -> Self {
        Self {
            header_scrolled: scroll_y >= HEADER_SCROLL_THRESHOLD,
            show_scroll_up: scroll_y >= SCROLL_UP_THRESHOLD,
        }
    }
}

/// Layout of a `section[id]` as measured from the page
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    pub fn contains(&self, scroll_y: f64) -> bool {
        let top = self.top - SECTION_LEAD;
        scroll_y > top && scroll_y <= top + self.height
    }
}

/// Active flag for every section, in input order
pub fn active_sections<'a>(
    scroll_y: f64,
    sections: &'a [SectionBounds],
) -> impl Iterator<Item = (&'a str, bool)> + 'a {
    sections
        .iter()
        .map(move |section| (section.id.as_str(), section.contains(scroll_y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(ScrollState::at(0.0), ScrollState::default());
        assert_eq!(
            ScrollState::at(50.0),
            ScrollState { header_scrolled: true, show_scroll_up: false }
        );
        assert_eq!(
            ScrollState::at(400.0),
            ScrollState { header_scrolled: true, show_scroll_up: true }
        );
    }

    #[test]
    fn test_active_section_window() {
        let sections = vec![
            SectionBounds::new("home", 0.0, 600.0),
            SectionBounds::new("services", 600.0, 800.0),
        ];

        let active: Vec<_> = active_sections(100.0, &sections).collect();
        assert_eq!(active, vec![("home", true), ("services", false)]);

        // 150px lead: services lights up before its top reaches the viewport
        let active: Vec<_> = active_sections(451.0, &sections).collect();
        assert_eq!(active, vec![("home", false), ("services", true)]);

        // Upper bound is inclusive, lower bound exclusive
        assert!(sections[0].contains(450.0));
        assert!(!sections[1].contains(450.0));
    }
}
