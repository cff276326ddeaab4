//! The tab bar: a single-selection state machine over the seven views.
//! Exactly one tab is active at any time by construction — the active tab is
//! one enum value, so there is no way to activate two panels or zero.

/// The seven views of the application, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    AvailableBooks,
    Readers,
    Search,
    AddBook,
    AddReader,
    Borrow,
    Return,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::AvailableBooks,
        Tab::Readers,
        Tab::Search,
        Tab::AddBook,
        Tab::AddReader,
        Tab::Borrow,
        Tab::Return,
    ];

    /// Title shown in the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            Tab::AvailableBooks => "Books",
            Tab::Readers => "Readers",
            Tab::Search => "Search",
            Tab::AddBook => "Add Book",
            Tab::AddReader => "Add Reader",
            Tab::Borrow => "Borrow",
            Tab::Return => "Return",
        }
    }

    /// Position within [`Tab::ALL`], used to highlight the tab bar.
    pub fn index(self) -> usize {
        Tab::ALL
            .iter()
            .position(|tab| *tab == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Data-bearing tabs refresh their backing list every time they are
    /// activated, including re-activation of the already-current tab.
    pub fn loads_on_activate(self) -> bool {
        matches!(self, Tab::AvailableBooks | Tab::Readers)
    }

    /// Tabs that host an input form and therefore capture printable keys.
    pub fn has_form(self) -> bool {
        matches!(
            self,
            Tab::Search | Tab::AddBook | Tab::AddReader | Tab::Borrow | Tab::Return
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_cycle_through_all_tabs() {
        let mut tab = Tab::AvailableBooks;
        for expected in Tab::ALL.iter().skip(1) {
            tab = tab.next();
            assert_eq!(tab, *expected);
        }
        assert_eq!(tab.next(), Tab::AvailableBooks);
        assert_eq!(Tab::AvailableBooks.previous(), Tab::Return);
    }

    #[test]
    fn indices_are_unique_and_in_order() {
        for (position, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), position);
        }
    }

    #[test]
    fn only_list_tabs_load_on_activation() {
        assert!(Tab::AvailableBooks.loads_on_activate());
        assert!(Tab::Readers.loads_on_activate());
        for tab in [Tab::Search, Tab::AddBook, Tab::AddReader, Tab::Borrow, Tab::Return] {
            assert!(!tab.loads_on_activate());
            assert!(tab.has_form());
        }
    }
}
