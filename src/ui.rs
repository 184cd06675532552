// UI layer: the terminal presenter. Rendering goes to stdout; the command
// prompt and the detail-view acknowledgment use `dialoguer`, and network
// waits get an `indicatif` spinner.

use std::time::Duration;

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{Identity, Ticket};
use crate::session::PageView;

/// Prompt shown before every command read.
pub const COMMAND_PROMPT: &str =
    "q->quit, n->next page, p->prev page. Enter a ticket id to expand";

/// Rendering and input surface for the session loop. The controller only
/// talks to this trait, so tests drive it with a scripted implementation
/// instead of a real terminal.
pub trait Presenter {
    fn render_page(&mut self, view: &PageView<'_>);
    fn render_ticket(&mut self, ticket: &Ticket, submitter: &Identity);
    fn show_message(&mut self, message: &str);
    fn read_command(&mut self) -> Result<String>;
    /// Hold the detail view until the user is done with it.
    fn acknowledge(&mut self) -> Result<()>;
}

/// The real, stdout-backed presenter.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render_page(&mut self, view: &PageView<'_>) {
        // Blank lines push the previous page out of view.
        println!("\n\n\n{}", view.header());
        for line in view.lines() {
            println!("{line}");
        }
    }

    fn render_ticket(&mut self, ticket: &Ticket, submitter: &Identity) {
        println!("\n{}", ticket_detail(ticket, submitter));
    }

    fn show_message(&mut self, message: &str) {
        println!("{message}");
    }

    fn read_command(&mut self) -> Result<String> {
        let line: String = Input::new()
            .with_prompt(COMMAND_PROMPT)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn acknowledge(&mut self) -> Result<()> {
        let _: String = Input::new()
            .with_prompt("Enter to continue")
            .allow_empty(true)
            .interact_text()?;
        Ok(())
    }
}

/// Assemble the relevant ticket fields into the detail view text.
pub fn ticket_detail(ticket: &Ticket, submitter: &Identity) -> String {
    format!(
        "[id: {}]\nstatus: {}\nsubject: {}\npriority: {}\nsubmitter: {}\ndescription: {}",
        ticket.id,
        ticket.status,
        ticket.subject,
        ticket.priority.as_deref().unwrap_or("-"),
        submitter.display(),
        ticket.description,
    )
}

/// Spinner shown while a network call is in flight, in the
/// `{spinner} {msg}` house style.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_view_lists_every_rendered_field() {
        let ticket = Ticket {
            id: 7,
            subject: "printer on fire".to_owned(),
            status: "open".to_owned(),
            description: "it burns".to_owned(),
            submitter_id: 9,
            priority: Some("high".to_owned()),
        };
        let text = ticket_detail(&ticket, &Identity::new("ada@example.com"));
        assert!(text.contains("[id: 7]"));
        assert!(text.contains("status: open"));
        assert!(text.contains("subject: printer on fire"));
        assert!(text.contains("priority: high"));
        assert!(text.contains("submitter: ada@example.com"));
        assert!(text.contains("description: it burns"));
    }

    #[test]
    fn detail_view_shows_placeholders_for_absent_data() {
        let ticket = Ticket {
            id: 7,
            subject: String::new(),
            status: String::new(),
            description: String::new(),
            submitter_id: 9,
            priority: None,
        };
        let text = ticket_detail(&ticket, &Identity::not_available());
        assert!(text.contains("priority: -"));
        assert!(text.contains("submitter: N/A"));
    }
}
