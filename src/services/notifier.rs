//! notifier.rs
//!
//! Имитация отправки билетов по почте. Каждое подтверждение уходит отдельной
//! задачей tokio после фиксированной задержки. Сессия задачу не ждёт и результат
//! не собирает: если процесс завершится раньше, подтверждение просто теряется.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::console::Output;
use crate::models::BookingRecord;

pub const SEPARATOR: &str = "#####################";

#[derive(Clone)]
pub struct Notifier {
    delay: Duration,
    output: Output,
}

impl Notifier {
    pub fn new(delay: Duration, output: Output) -> Self {
        Self { delay, output }
    }

    /// Текст подтверждения без рамки.
    pub fn confirmation(record: &BookingRecord) -> String {
        format!(
            "{} ticket(s) sent to {} {} at {}",
            record.ticket_count, record.first_name, record.last_name, record.email
        )
    }

    /// Ждёт задержку и печатает подтверждение в рамке из разделителей.
    pub async fn send_tickets(&self, record: BookingRecord) {
        tokio::time::sleep(self.delay).await;

        let confirmation = Self::confirmation(&record);
        // Отправка не может "упасть"; ошибку вывода только логируем
        if let Err(e) = self.output.block(&[SEPARATOR, &confirmation, SEPARATOR]) {
            warn!("Failed to print ticket confirmation for {}: {}", record.email, e);
            return;
        }
        info!(email = %record.email, tickets = record.ticket_count, "confirmation delivered");
    }

    /// Запускает отправку в фоне. Вызывающий код может выбросить handle.
    pub fn dispatch(&self, record: BookingRecord) -> JoinHandle<()> {
        let notifier = self.clone();
        tokio::spawn(async move { notifier.send_tickets(record).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::SharedBuffer;
    use tokio::time::Instant;

    fn record() -> BookingRecord {
        BookingRecord {
            first_name: "John".into(),
            last_name: "Smith".into(),
            email: "j@x.com".into(),
            ticket_count: 2,
        }
    }

    #[test]
    fn confirmation_text_carries_all_fields() {
        assert_eq!(Notifier::confirmation(&record()), "2 ticket(s) sent to John Smith at j@x.com");
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_printed_before_the_delay() {
        let buffer = SharedBuffer::default();
        let notifier = Notifier::new(Duration::from_secs(10), buffer.output());

        let handle = notifier.dispatch(record());
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(buffer.contents().is_empty());
        assert!(!handle.is_finished());

        handle.await.unwrap();
        assert_eq!(
            buffer.contents(),
            "#####################\n2 ticket(s) sent to John Smith at j@x.com\n#####################\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn send_takes_at_least_the_configured_delay() {
        let buffer = SharedBuffer::default();
        let notifier = Notifier::new(Duration::from_secs(10), buffer.output());

        let started = Instant::now();
        notifier.send_tickets(record()).await;
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert!(buffer.contents().contains("2 ticket(s) sent to John Smith at j@x.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn confirmations_are_independent() {
        let buffer = SharedBuffer::default();
        let slow = Notifier::new(Duration::from_secs(10), buffer.output());
        let fast = Notifier::new(Duration::from_secs(1), buffer.output());

        let mut second = record();
        second.first_name = "Anna".into();
        let a = slow.dispatch(record());
        let b = fast.dispatch(second);
        let _ = tokio::join!(a, b);

        let out = buffer.contents();
        let anna = out.find("Anna").unwrap();
        let john = out.find("John").unwrap();
        assert!(anna < john);
    }
}
