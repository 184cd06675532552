// Session state machine: owns the fetched ticket set and the current page,
// parses command lines, and drives rendering through a Presenter. The loop
// is single-threaded and cooperative; one command is fully processed,
// including any identity lookup round-trip, before the next line is read.

use log::debug;

use crate::api::{SubmitterLookup, Ticket};
use crate::error::Error;
use crate::pagination::Pager;
use crate::ui::Presenter;

/// One parsed command line. Parsing is case-insensitive and never fails:
/// anything that is not a keyword or a non-negative integer becomes
/// `Unknown` and is reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Next,
    Prev,
    Ticket(u64),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "q" | "quit" => Self::Quit,
            "n" | "next" => Self::Next,
            "p" | "prev" => Self::Prev,
            other => match other.parse::<u64>() {
                Ok(id) => Self::Ticket(id),
                Err(_) => Self::Unknown(other.to_owned()),
            },
        }
    }
}

/// What a dispatched command asks the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Quit,
    ShowPage,
    ShowTicket(usize),
}

/// The slice of the ticket set visible on the current page, plus the
/// header arithmetic, handed to the presenter for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub page: usize,
    pub page_count: usize,
    pub tickets: &'a [Ticket],
    /// True when the set continues past this page's slice.
    pub truncated: bool,
}

impl PageView<'_> {
    pub fn header(&self) -> String {
        format!("Showing page {}/{}", self.page + 1, self.page_count + 1)
    }

    pub fn lines(&self) -> Vec<String> {
        self.tickets
            .iter()
            .map(|ticket| format!("[id: {}] | {}", ticket.id, ticket.subject))
            .collect()
    }
}

/// The browsing session. The ticket set is fixed at construction; the
/// current page is the only field that changes while browsing, and it is
/// always clamped to `[0, page_count]`.
pub struct Session {
    tickets: Vec<Ticket>,
    pager: Pager,
    page: usize,
    page_count: usize,
}

impl Session {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self::with_pager(tickets, Pager::default())
    }

    pub fn with_pager(tickets: Vec<Ticket>, pager: Pager) -> Self {
        let page_count = pager.page_count(tickets.len());
        Self {
            tickets,
            pager,
            page: 0,
            page_count,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_view(&self) -> PageView<'_> {
        let bounds = self.pager.page_bounds(self.page, self.tickets.len());
        let truncated = bounds.end < self.tickets.len();
        PageView {
            page: self.page,
            page_count: self.page_count,
            tickets: &self.tickets[bounds],
            truncated,
        }
    }

    /// Run the command loop until the user quits. Startup already fetched
    /// the tickets, so everything from here on is recoverable: command
    /// failures are rendered and the loop continues. Only presenter I/O
    /// failures (a closed terminal) unwind.
    pub fn run<P: Presenter>(
        &mut self,
        presenter: &mut P,
        lookup: &impl SubmitterLookup,
    ) -> anyhow::Result<()> {
        presenter.render_page(&self.page_view());

        loop {
            let line = presenter.read_command()?;
            match self.apply(Command::parse(&line)) {
                Ok(Outcome::Quit) => {
                    debug!("session terminated by user");
                    return Ok(());
                }
                Ok(Outcome::ShowTicket(index)) => {
                    let ticket = &self.tickets[index];
                    let submitter = lookup.submitter_identity(ticket.submitter_id);
                    presenter.render_ticket(ticket, &submitter);
                    presenter.acknowledge()?;
                }
                Ok(Outcome::ShowPage) => {}
                Err(err) => presenter.show_message(&err.to_string()),
            }
            presenter.render_page(&self.page_view());
        }
    }

    /// Apply one command to the session state. Ticket ids are searched
    /// across the entire set, not just the current page; page steps are
    /// clamped rather than wrapped.
    fn apply(&mut self, command: Command) -> Result<Outcome, Error> {
        match command {
            Command::Quit => Ok(Outcome::Quit),
            Command::Next => {
                self.page = self.pager.clamp(self.page as isize + 1, self.page_count);
                Ok(Outcome::ShowPage)
            }
            Command::Prev => {
                self.page = self.pager.clamp(self.page as isize - 1, self.page_count);
                Ok(Outcome::ShowPage)
            }
            Command::Ticket(id) => self
                .tickets
                .iter()
                .position(|ticket| ticket.id == id)
                .map(Outcome::ShowTicket)
                .ok_or_else(|| Error::Command(format!("no ticket with id {id} was found"))),
            Command::Unknown(line) => Err(Error::Command(format!(
                "command not recognized: {line}"
            ))),
        }
    }
}
