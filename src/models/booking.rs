use validator::Validate;

/// Принятая бронь. После создания не меняется и живёт до выхода из процесса.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ticket_count: u32,
}

// Сырые поля, введённые покупателем в консоли
#[derive(Debug, Clone, Validate)]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    #[validate(contains(pattern = "@"))]
    pub email: String,
    pub ticket_count: u32,
}

impl BookingRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        ticket_count: u32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ticket_count,
        }
    }
}

impl From<BookingRequest> for BookingRecord {
    fn from(req: BookingRequest) -> Self {
        BookingRecord {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            ticket_count: req.ticket_count,
        }
    }
}
