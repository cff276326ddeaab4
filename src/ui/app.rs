use std::sync::mpsc::Sender;
use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::models::{Book, Reader};
use crate::ui::forms::{BookField, BookForm, LoanField, LoanForm, ReaderField, ReaderForm, SearchForm};
use crate::ui::helpers::{centered_rect, surface_error};
use crate::ui::notice::{NoticeBoard, NoticeKind};
use crate::ui::tabs::Tab;
use crate::ui::views::{
    book_lines, reader_lines, LoadState, BOOKS_PLACEHOLDERS, SEARCH_PLACEHOLDERS,
};
use crate::worker::{ApiCommand, ApiEvent};

/// Height of the tab bar at the top of the screen.
const TAB_BAR_HEIGHT: u16 = 3;
/// Footer space reserved for notices and key hints.
const FOOTER_HEIGHT: u16 = 3;

/// Modal overlays on top of the current tab.
enum Mode {
    Normal,
    ConfirmQuit,
}

/// Central application state: the active tab, the server-backed lists, one
/// form per input workflow, and the channel to the API worker.
///
/// Every data-bearing view keeps a generation token next to its
/// [`LoadState`]. Issuing a load bumps the token; a completion event is
/// applied only while its token still matches, so responses that outlived
/// their view are discarded instead of overwriting newer data.
pub struct App {
    tab: Tab,
    mode: Mode,
    books: LoadState<Book>,
    readers: LoadState<Reader>,
    search_results: LoadState<Book>,
    book_form: BookForm,
    reader_form: ReaderForm,
    search_form: SearchForm,
    borrow_form: LoanForm,
    return_form: LoanForm,
    notices: NoticeBoard,
    commands: Sender<ApiCommand>,
    books_token: u64,
    readers_token: u64,
    search_token: u64,
    next_token: u64,
    confirm_close: bool,
}

impl App {
    /// Build the initial state. `confirm_close` comes from the host
    /// integration: embedded sessions confirm before quitting.
    pub fn new(commands: Sender<ApiCommand>, confirm_close: bool) -> Self {
        Self {
            tab: Tab::AvailableBooks,
            mode: Mode::Normal,
            books: LoadState::Idle,
            readers: LoadState::Idle,
            search_results: LoadState::Idle,
            book_form: BookForm::default(),
            reader_form: ReaderForm::default(),
            search_form: SearchForm::default(),
            borrow_form: LoanForm::default(),
            return_form: LoanForm::default(),
            notices: NoticeBoard::default(),
            commands,
            books_token: 0,
            readers_token: 0,
            search_token: 0,
            next_token: 0,
            confirm_close,
        }
    }

    /// Kick off the initial data load for the starting tab.
    pub fn reload_active(&mut self) {
        self.reload(self.tab);
    }

    /// Process one key press. Returns `true` when the application should
    /// exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Mode::ConfirmQuit = self.mode {
            return self.handle_confirm_quit(code);
        }

        match code {
            KeyCode::Esc => self.request_quit(),
            KeyCode::Left => {
                self.select_tab(self.tab.previous());
                false
            }
            KeyCode::Right => {
                self.select_tab(self.tab.next());
                false
            }
            KeyCode::Tab => {
                self.focus_next_field();
                false
            }
            KeyCode::Enter => {
                self.submit_active_form();
                false
            }
            KeyCode::Backspace => {
                self.backspace_active_form();
                false
            }
            KeyCode::Char(ch) => self.handle_char(ch),
            _ => false,
        }
    }

    /// Apply a completion event from the API worker to the UI state. This is
    /// the single place where network outcomes become placeholders, notices,
    /// and follow-up reloads; nothing here propagates an error further.
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        let now = Instant::now();
        match event {
            ApiEvent::AvailableBooksLoaded { token, result } => {
                if token != self.books_token {
                    debug!(token, current = self.books_token, "discarding stale books load");
                    return;
                }
                match result {
                    Ok(books) => self.books = LoadState::Ready(books),
                    Err(err) => {
                        warn!(%err, "available books load failed");
                        self.books = LoadState::Failed;
                        self.notices
                            .post("Could not reach the library service.", NoticeKind::Error, now);
                    }
                }
            }
            ApiEvent::ReadersLoaded { token, result } => {
                if token != self.readers_token {
                    debug!(token, current = self.readers_token, "discarding stale readers load");
                    return;
                }
                match result {
                    Ok(readers) => self.readers = LoadState::Ready(readers),
                    Err(err) => {
                        warn!(%err, "readers load failed");
                        self.readers = LoadState::Failed;
                        self.notices
                            .post("Could not reach the library service.", NoticeKind::Error, now);
                    }
                }
            }
            ApiEvent::SearchFinished { token, result } => {
                if token != self.search_token {
                    debug!(token, current = self.search_token, "discarding stale search");
                    return;
                }
                match result {
                    Ok(books) => self.search_results = LoadState::Ready(books),
                    Err(err) => {
                        warn!(%err, "search failed");
                        self.search_results = LoadState::Failed;
                        self.notices
                            .post("The search could not be completed.", NoticeKind::Error, now);
                    }
                }
            }
            ApiEvent::BookAdded { result } => match result {
                Ok(()) => {
                    self.notices.post("Book added.", NoticeKind::Success, now);
                    self.book_form.reset();
                    self.reload(Tab::AvailableBooks);
                }
                Err(err) => {
                    warn!(%err, "add book failed");
                    self.notices
                        .post("Could not add the book.", NoticeKind::Error, now);
                }
            },
            ApiEvent::ReaderAdded { result } => match result {
                Ok(()) => {
                    self.notices.post("Reader added.", NoticeKind::Success, now);
                    self.reader_form.reset();
                    self.reload(Tab::Readers);
                }
                Err(err) => {
                    warn!(%err, "add reader failed");
                    self.notices
                        .post("Could not add the reader.", NoticeKind::Error, now);
                }
            },
            // Borrow and return deliberately reload nothing: they cannot
            // know which list, if any, is on screen.
            ApiEvent::BookBorrowed { result } => match result {
                Ok(()) => {
                    self.notices
                        .post("Book checked out.", NoticeKind::Success, now);
                    self.borrow_form.reset();
                }
                Err(err) => {
                    warn!(%err, "borrow failed");
                    self.notices
                        .post("Could not check out the book.", NoticeKind::Error, now);
                }
            },
            ApiEvent::BookReturned { result } => match result {
                Ok(()) => {
                    self.notices.post("Book returned.", NoticeKind::Success, now);
                    self.return_form.reset();
                }
                Err(err) => {
                    warn!(%err, "return failed");
                    self.notices
                        .post("Could not return the book.", NoticeKind::Error, now);
                }
            },
        }
    }

    /// Advance time-based state; called once per draw loop iteration.
    pub fn tick(&mut self, now: Instant) {
        self.notices.tick(now);
    }

    /// Activate a tab. Data-bearing tabs refresh on every activation, even
    /// when re-activating the current one.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab.loads_on_activate() {
            self.reload(tab);
        }
    }

    fn request_quit(&mut self) -> bool {
        if self.confirm_close {
            self.mode = Mode::ConfirmQuit;
            false
        } else {
            true
        }
    }

    fn handle_confirm_quit(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = Mode::Normal;
                false
            }
            _ => false,
        }
    }

    fn handle_char(&mut self, ch: char) -> bool {
        if self.tab.has_form() {
            self.push_char_to_active_form(ch);
            return false;
        }
        match ch {
            'q' => self.request_quit(),
            'r' => {
                self.reload(self.tab);
                false
            }
            _ => false,
        }
    }

    fn push_char_to_active_form(&mut self, ch: char) {
        match self.tab {
            Tab::Search => {
                self.search_form.push_char(ch);
            }
            Tab::AddBook => {
                self.book_form.push_char(ch);
            }
            Tab::AddReader => {
                self.reader_form.push_char(ch);
            }
            Tab::Borrow => {
                self.borrow_form.push_char(ch);
            }
            Tab::Return => {
                self.return_form.push_char(ch);
            }
            _ => {}
        }
    }

    fn backspace_active_form(&mut self) {
        match self.tab {
            Tab::Search => self.search_form.backspace(),
            Tab::AddBook => self.book_form.backspace(),
            Tab::AddReader => self.reader_form.backspace(),
            Tab::Borrow => self.borrow_form.backspace(),
            Tab::Return => self.return_form.backspace(),
            _ => {}
        }
    }

    fn focus_next_field(&mut self) {
        match self.tab {
            Tab::AddBook => self.book_form.next_field(),
            Tab::AddReader => self.reader_form.next_field(),
            Tab::Borrow => self.borrow_form.next_field(),
            Tab::Return => self.return_form.next_field(),
            _ => {}
        }
    }

    fn submit_active_form(&mut self) {
        match self.tab {
            Tab::Search => self.submit_search(),
            Tab::AddBook => self.submit_add_book(),
            Tab::AddReader => self.submit_add_reader(),
            Tab::Borrow => self.submit_borrow(),
            Tab::Return => self.submit_return(),
            _ => {}
        }
    }

    fn submit_search(&mut self) {
        let author = self.search_form.query();
        let token = self.bump_token();
        self.search_token = token;
        self.search_results = LoadState::Loading;
        self.send(ApiCommand::SearchBooks { token, author });
    }

    fn submit_add_book(&mut self) {
        match self.book_form.parse_inputs() {
            Ok(book) => {
                self.book_form.error = None;
                self.send(ApiCommand::AddBook { book });
            }
            Err(err) => self.book_form.error = Some(surface_error(&err)),
        }
    }

    fn submit_add_reader(&mut self) {
        match self.reader_form.parse_inputs() {
            Ok(reader) => {
                self.reader_form.error = None;
                self.send(ApiCommand::AddReader { reader });
            }
            Err(err) => self.reader_form.error = Some(surface_error(&err)),
        }
    }

    fn submit_borrow(&mut self) {
        match self.borrow_form.parse_inputs() {
            Ok(slip) => {
                self.borrow_form.error = None;
                self.send(ApiCommand::BorrowBook { slip });
            }
            Err(err) => self.borrow_form.error = Some(surface_error(&err)),
        }
    }

    fn submit_return(&mut self) {
        match self.return_form.parse_inputs() {
            Ok(slip) => {
                self.return_form.error = None;
                self.send(ApiCommand::ReturnBook { slip });
            }
            Err(err) => self.return_form.error = Some(surface_error(&err)),
        }
    }

    /// Issue a fresh load for one of the data-bearing views.
    fn reload(&mut self, tab: Tab) {
        match tab {
            Tab::AvailableBooks => {
                let token = self.bump_token();
                self.books_token = token;
                self.books = LoadState::Loading;
                self.send(ApiCommand::LoadAvailableBooks { token });
            }
            Tab::Readers => {
                let token = self.bump_token();
                self.readers_token = token;
                self.readers = LoadState::Loading;
                self.send(ApiCommand::LoadReaders { token });
            }
            _ => {}
        }
    }

    fn bump_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn send(&mut self, command: ApiCommand) {
        if self.commands.send(command).is_err() {
            warn!("api worker is gone; command dropped");
            self.notices.post(
                "Internal error: background worker stopped.",
                NoticeKind::Error,
                Instant::now(),
            );
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TAB_BAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tab_bar(frame, chunks[0]);
        match self.tab {
            Tab::AvailableBooks => self.draw_books(frame, chunks[1]),
            Tab::Readers => self.draw_readers(frame, chunks[1]),
            Tab::Search => self.draw_search(frame, chunks[1]),
            Tab::AddBook => self.draw_add_book(frame, chunks[1]),
            Tab::AddReader => self.draw_add_reader(frame, chunks[1]),
            Tab::Borrow => self.draw_loan(frame, chunks[1], "Borrow a Book", &self.borrow_form),
            Tab::Return => self.draw_loan(frame, chunks[1], "Return a Book", &self.return_form),
        }
        self.draw_footer(frame, chunks[2]);

        if let Mode::ConfirmQuit = self.mode {
            self.draw_confirm_quit(frame, area);
        }
    }

    fn draw_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(Block::default().borders(Borders::ALL).title("Library"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_books(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(book_lines(&self.books, &BOOKS_PLACEHOLDERS))
            .block(Block::default().borders(Borders::ALL).title("Available Books"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_readers(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(reader_lines(&self.readers))
            .block(Block::default().borders(Borders::ALL).title("Readers"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let form = Paragraph::new(vec![self.search_form.build_line()])
            .block(Block::default().borders(Borders::ALL).title("Search by Author"));
        frame.render_widget(form, chunks[0]);

        let inner_x = chunks[0].x + 1;
        let inner_y = chunks[0].y + 1;
        let prefix = "Author: ".len() as u16;
        frame.set_cursor_position((inner_x + prefix + self.search_form.value_len() as u16, inner_y));

        let results = Paragraph::new(book_lines(&self.search_results, &SEARCH_PLACEHOLDERS))
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .wrap(Wrap { trim: true });
        frame.render_widget(results, chunks[1]);
    }

    fn draw_add_book(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Add a Book");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            self.book_form.build_line("ISBN", BookField::Isbn),
            self.book_form.build_line("Title", BookField::Title),
            self.book_form.build_line("Author", BookField::Author),
            Line::from(""),
        ];
        lines.push(form_status_line(self.book_form.error.as_deref()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row, len) = match self.book_form.active {
            BookField::Isbn => ("ISBN: ", 0, self.book_form.value_len(BookField::Isbn)),
            BookField::Title => ("Title: ", 1, self.book_form.value_len(BookField::Title)),
            BookField::Author => ("Author: ", 2, self.book_form.value_len(BookField::Author)),
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + len as u16,
            inner.y + row,
        ));
    }

    fn draw_add_reader(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Add a Reader");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            self.reader_form.build_line("Reader ID", ReaderField::Id),
            self.reader_form.build_line("Name", ReaderField::Name),
            Line::from(""),
        ];
        lines.push(form_status_line(self.reader_form.error.as_deref()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row, len) = match self.reader_form.active {
            ReaderField::Id => ("Reader ID: ", 0, self.reader_form.value_len(ReaderField::Id)),
            ReaderField::Name => ("Name: ", 1, self.reader_form.value_len(ReaderField::Name)),
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + len as u16,
            inner.y + row,
        ));
    }

    fn draw_loan(&self, frame: &mut Frame, area: Rect, title: &str, form: &LoanForm) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            form.build_line("ISBN", LoanField::Isbn),
            form.build_line("Reader ID", LoanField::ReaderId),
            Line::from(""),
        ];
        lines.push(form_status_line(form.error.as_deref()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row, len) = match form.active {
            LoanField::Isbn => ("ISBN: ", 0, form.value_len(LoanField::Isbn)),
            LoanField::ReaderId => ("Reader ID: ", 1, form.value_len(LoanField::ReaderId)),
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + len as u16,
            inner.y + row,
        ));
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(notice) = self.notices.current() {
            Line::from(Span::styled(notice.message.clone(), notice.kind.style()))
        } else {
            self.key_hints()
        };
        let footer = Paragraph::new(line)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn key_hints(&self) -> Line<'static> {
        let key_style = Style::default().fg(Color::Cyan);
        if self.tab.has_form() {
            Line::from(vec![
                Span::styled("[←→]", key_style),
                Span::raw(" Tabs   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Submit   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("[←→]", key_style),
                Span::raw(" Tabs   "),
                Span::styled("[r]", key_style),
                Span::raw(" Refresh   "),
                Span::styled("[q/Esc]", key_style),
                Span::raw(" Quit"),
            ])
        }
    }

    fn draw_confirm_quit(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Leave the Library").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from("Close the lending desk?"),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

fn form_status_line(error: Option<&str>) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "Enter to submit • Tab to switch fields • ←/→ to change tabs",
            Style::default().fg(Color::Gray),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use reqwest::StatusCode;

    use super::*;
    use crate::api::ApiError;
    use crate::models::Book;

    fn test_app(confirm_close: bool) -> (App, Receiver<ApiCommand>) {
        let (tx, rx) = mpsc::channel();
        (App::new(tx, confirm_close), rx)
    }

    fn drain(rx: &Receiver<ApiCommand>) -> Vec<ApiCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    fn sample_book() -> Book {
        Book {
            isbn: "123".into(),
            title: "T".into(),
            author: "A".into(),
            available: true,
        }
    }

    fn server_error() -> ApiError {
        ApiError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[test]
    fn selecting_readers_issues_exactly_one_fetch() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::Readers);
        let commands = drain(&rx);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], ApiCommand::LoadReaders { .. }));
        assert_eq!(app.tab, Tab::Readers);
    }

    #[test]
    fn reactivating_the_current_tab_fetches_again() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::AvailableBooks);
        app.select_tab(Tab::AvailableBooks);
        let commands = drain(&rx);
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn selecting_a_form_tab_issues_no_fetch() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::Borrow);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn add_book_success_clears_form_and_reloads_available_books() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::AddBook);
        app.book_form.isbn = "123".into();
        app.book_form.title = "T".into();
        app.book_form.author = "A".into();
        app.handle_key(KeyCode::Enter);

        let commands = drain(&rx);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            ApiCommand::AddBook { book } => assert_eq!(book.isbn, "123"),
            other => panic!("expected AddBook, got {other:?}"),
        }

        app.handle_api_event(ApiEvent::BookAdded { result: Ok(()) });
        assert!(app.book_form.isbn.is_empty());
        assert!(app.book_form.title.is_empty());
        let followups = drain(&rx);
        assert_eq!(followups.len(), 1);
        assert!(matches!(followups[0], ApiCommand::LoadAvailableBooks { .. }));
        let notice = app.notices.current().expect("success notice shown");
        assert_eq!(notice.kind, NoticeKind::Success);
    }

    #[test]
    fn add_book_failure_keeps_form_contents() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::AddBook);
        app.book_form.isbn = "123".into();
        app.book_form.title = "T".into();
        app.book_form.author = "A".into();
        app.handle_key(KeyCode::Enter);
        drain(&rx);

        app.handle_api_event(ApiEvent::BookAdded {
            result: Err(server_error()),
        });
        assert_eq!(app.book_form.isbn, "123");
        assert!(drain(&rx).is_empty(), "no reload on failure");
        let notice = app.notices.current().expect("error notice shown");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn borrow_success_notifies_without_reloading_any_list() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::Borrow);
        app.borrow_form.isbn = "123".into();
        app.borrow_form.reader_id = "R1".into();
        app.handle_key(KeyCode::Enter);
        let commands = drain(&rx);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], ApiCommand::BorrowBook { .. }));

        app.handle_api_event(ApiEvent::BookBorrowed { result: Ok(()) });
        assert!(drain(&rx).is_empty(), "borrow must not re-fetch lists");
        assert!(app.borrow_form.isbn.is_empty());
        let notice = app.notices.current().expect("success notice shown");
        assert_eq!(notice.kind, NoticeKind::Success);
    }

    #[test]
    fn blank_submission_sets_inline_error_and_sends_nothing() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::AddReader);
        app.handle_key(KeyCode::Enter);
        assert!(drain(&rx).is_empty());
        assert!(app.reader_form.error.is_some());
    }

    #[test]
    fn stale_load_responses_are_discarded() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::AvailableBooks);
        app.select_tab(Tab::AvailableBooks);
        let commands = drain(&rx);
        let tokens: Vec<u64> = commands
            .iter()
            .map(|command| match command {
                ApiCommand::LoadAvailableBooks { token } => *token,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();

        app.handle_api_event(ApiEvent::AvailableBooksLoaded {
            token: tokens[0],
            result: Ok(vec![sample_book()]),
        });
        assert!(
            matches!(app.books, LoadState::Loading),
            "stale response must not be applied"
        );

        app.handle_api_event(ApiEvent::AvailableBooksLoaded {
            token: tokens[1],
            result: Ok(vec![sample_book()]),
        });
        assert!(matches!(app.books, LoadState::Ready(ref books) if books.len() == 1));
    }

    #[test]
    fn failed_load_shows_error_placeholder_state() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::Readers);
        let commands = drain(&rx);
        let token = match commands[0] {
            ApiCommand::LoadReaders { token } => token,
            ref other => panic!("unexpected command {other:?}"),
        };
        app.handle_api_event(ApiEvent::ReadersLoaded {
            token,
            result: Err(server_error()),
        });
        assert!(matches!(app.readers, LoadState::Failed));
    }

    #[test]
    fn search_submits_trimmed_query_and_empty_is_legal() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::Search);
        for ch in " O'Brien & Co ".chars() {
            app.handle_key(KeyCode::Char(ch));
        }
        app.handle_key(KeyCode::Enter);
        let commands = drain(&rx);
        match &commands[0] {
            ApiCommand::SearchBooks { author, .. } => assert_eq!(author, "O'Brien & Co"),
            other => panic!("expected SearchBooks, got {other:?}"),
        }

        app.search_form.author.clear();
        app.handle_key(KeyCode::Enter);
        let commands = drain(&rx);
        match &commands[0] {
            ApiCommand::SearchBooks { author, .. } => assert_eq!(author, ""),
            other => panic!("expected SearchBooks, got {other:?}"),
        }
    }

    #[test]
    fn printable_keys_type_into_forms_instead_of_acting_as_shortcuts() {
        let (mut app, rx) = test_app(false);
        app.select_tab(Tab::Search);
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert!(!app.handle_key(KeyCode::Char('r')));
        assert_eq!(app.search_form.author, "qr");
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn quit_is_immediate_without_host_confirmation() {
        let (mut app, _rx) = test_app(false);
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn quit_confirms_when_the_host_asked_for_it() {
        let (mut app, _rx) = test_app(true);
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(!app.handle_key(KeyCode::Char('n')), "declining keeps running");
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(app.handle_key(KeyCode::Char('y')), "confirming exits");
    }
}
