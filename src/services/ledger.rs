use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::models::{BookingRecord, BookingRequest};

// Остаток и список броней меняются только вместе, под одним замком
#[derive(Debug)]
struct LedgerState {
    remaining: u32,
    bookings: Vec<BookingRecord>,
}

/// Реестр билетов конференции в памяти процесса.
#[derive(Debug)]
pub struct Ledger {
    total: u32,
    state: Mutex<LedgerState>,
}

impl Ledger {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            state: Mutex::new(LedgerState {
                remaining: total,
                bookings: Vec::new(),
            }),
        }
    }

    // Паника в чужом потоке не должна ломать реестр: данные меняются атомарно
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn remaining(&self) -> u32 {
        self.lock().remaining
    }

    /// Списывает билеты и записывает бронь.
    ///
    /// Границы не проверяются: заявка уже должна пройти
    /// [`validate_booking`](crate::services::validation::validate_booking)
    /// с актуальным остатком.
    pub fn book(&self, request: BookingRequest) -> BookingRecord {
        let mut state = self.lock();
        debug_assert!(request.ticket_count <= state.remaining);

        state.remaining -= request.ticket_count;
        let record = BookingRecord::from(request);
        state.bookings.push(record.clone());

        info!(
            first_name = %record.first_name,
            tickets = record.ticket_count,
            remaining = state.remaining,
            "booking committed"
        );
        record
    }

    /// Имена покупателей в порядке бронирования.
    pub fn first_names(&self) -> Vec<String> {
        self.lock()
            .bookings
            .iter()
            .map(|b| b.first_name.clone())
            .collect()
    }

    pub fn bookings(&self) -> Vec<BookingRecord> {
        self.lock().bookings.clone()
    }

    pub fn booked_tickets(&self) -> u32 {
        self.lock().bookings.iter().map(|b| b.ticket_count).sum()
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining() == 0
    }
}
