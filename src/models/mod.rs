pub mod user;
pub mod event;
pub mod attendee;
pub mod ticket;

pub use user::{Credentials, User};
pub use event::{Event, EventPayload};
pub use attendee::{Attendee, AttendeePayload};
pub use ticket::{Ticket, TicketDetails, TicketPayload};
