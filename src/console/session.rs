use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::console::Output;
use crate::models::BookingRequest;
use crate::services::{validate_booking, Ledger, Notifier};
use crate::AppState;

pub const LOG_TAG: &str = "Booking System";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Чем закончилась сессия.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    SoldOut,
    InputClosed,
}

/// Консольный цикл: ввод, проверка, бронь, уведомление, вывод.
pub struct ConsoleSession<R> {
    input: R,
    output: Output,
    conference_name: String,
    ledger: Arc<Ledger>,
    notifier: Notifier,
}

impl<R: AsyncBufRead + Unpin> ConsoleSession<R> {
    pub fn new(state: &AppState, input: R, output: Output) -> Self {
        Self {
            input,
            output,
            conference_name: state.config.conference_name.clone(),
            ledger: Arc::clone(&state.ledger),
            notifier: state.notifier.clone(),
        }
    }

    pub async fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        self.greet()?;

        loop {
            let Some(request) = self.read_request().await? else {
                info!("input closed, ending session");
                return Ok(SessionOutcome::InputClosed);
            };

            // Ошибка проверки не трогает реестр, начинаем ввод заново
            if let Err(e) = validate_booking(&request, self.ledger.remaining()) {
                warn!("{LOG_TAG}: {e}");
                continue;
            }

            let record = self.ledger.book(request);
            // Уведомление живёт само по себе, handle не нужен
            drop(self.notifier.dispatch(record.clone()));

            self.output.line(&format!(
                "Thank you {} {} for booking {} tickets. A confirmation email will be sent to {}.",
                record.first_name, record.last_name, record.ticket_count, record.email
            ))?;
            self.output.line(&format!("{} tickets remaining.", self.ledger.remaining()))?;
            self.print_first_names()?;

            if self.ledger.is_sold_out() {
                self.output.line("All tickets have been sold out. Come back next year.")?;
                info!("sold out, pending confirmations are abandoned");
                return Ok(SessionOutcome::SoldOut);
            }
        }
    }

    fn greet(&self) -> io::Result<()> {
        self.output.line(&format!("Welcome to the {} booking application", self.conference_name))?;
        self.output.line(&format!(
            "We have a total of {} tickets and {} are still available.",
            self.ledger.total(),
            self.ledger.remaining()
        ))
    }

    fn print_first_names(&self) -> io::Result<()> {
        let names = self.ledger.first_names();
        self.output
            .line(&format!("First names of bookings: [{}]", names.join(" ")))
    }

    async fn read_request(&mut self) -> Result<Option<BookingRequest>, SessionError> {
        let Some(first_name) = self.ask("Please enter your first name: ").await? else {
            return Ok(None);
        };
        let Some(last_name) = self.ask("Please enter your last name: ").await? else {
            return Ok(None);
        };
        let Some(email) = self.ask("Please enter your email address: ").await? else {
            return Ok(None);
        };
        let Some(tickets) = self.ask("How many tickets would you like to purchase? ").await? else {
            return Ok(None);
        };

        Ok(Some(BookingRequest::new(first_name, last_name, email, parse_tickets(&tickets))))
    }

    // None, если ввод закончился
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        self.output.prompt(prompt)?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

// Нечисловой ввод считается нулём билетов и дальше отсекается проверкой
fn parse_tickets(raw: &str) -> u32 {
    raw.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::testing::SharedBuffer;

    fn state(tickets: u32, output: &Output) -> AppState {
        let config = Config {
            conference_tickets: tickets,
            confirmation_delay_secs: 10,
            ..Config::default()
        };
        AppState::new(config, output.clone())
    }

    #[test]
    fn garbage_ticket_input_parses_as_zero() {
        assert_eq!(parse_tickets("3"), 3);
        assert_eq!(parse_tickets("three"), 0);
        assert_eq!(parse_tickets("-1"), 0);
        assert_eq!(parse_tickets(""), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn greets_and_stops_when_input_closes() {
        let buffer = SharedBuffer::default();
        let output = buffer.output();
        let state = state(50, &output);

        let mut session = ConsoleSession::new(&state, &b""[..], output);
        let outcome = session.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::InputClosed);
        let out = buffer.contents();
        assert!(out.starts_with(
            "Welcome to the Go Conference booking application\n\
             We have a total of 50 tickets and 50 are still available.\n"
        ));
        assert!(out.ends_with("Please enter your first name: "));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_booking_leaves_ledger_untouched() {
        let buffer = SharedBuffer::default();
        let output = buffer.output();
        let state = state(50, &output);

        let input = "A\nSmith\na@x.com\n1\n";
        let mut session = ConsoleSession::new(&state, input.as_bytes(), output);
        assert_eq!(session.run().await.unwrap(), SessionOutcome::InputClosed);

        assert_eq!(state.ledger.remaining(), 50);
        assert!(state.ledger.bookings().is_empty());
        assert!(!buffer.contents().contains("Thank you"));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_booking_prints_summary() {
        let buffer = SharedBuffer::default();
        let output = buffer.output();
        let state = state(50, &output);

        let input = "John\nSmith\nj@x.com\n2\n";
        let mut session = ConsoleSession::new(&state, input.as_bytes(), output);
        assert_eq!(session.run().await.unwrap(), SessionOutcome::InputClosed);

        assert_eq!(state.ledger.remaining(), 48);
        assert_eq!(state.ledger.first_names(), vec!["John"]);
        let out = buffer.contents();
        assert!(out.contains(
            "Thank you John Smith for booking 2 tickets. A confirmation email will be sent to j@x.com.\n"
        ));
        assert!(out.contains("48 tickets remaining.\n"));
        assert!(out.contains("First names of bookings: [John]\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn booking_the_last_tickets_ends_the_session() {
        let buffer = SharedBuffer::default();
        let output = buffer.output();
        let state = state(3, &output);

        // Строки после распродажи уже не читаются
        let input = "John\nSmith\nj@x.com\n3\nAnna\nLee\na@x.com\n1\n";
        let mut session = ConsoleSession::new(&state, input.as_bytes(), output);
        assert_eq!(session.run().await.unwrap(), SessionOutcome::SoldOut);

        assert_eq!(state.ledger.remaining(), 0);
        assert_eq!(state.ledger.first_names(), vec!["John"]);
        assert!(buffer
            .contents()
            .ends_with("All tickets have been sold out. Come back next year.\n"));
    }
}
