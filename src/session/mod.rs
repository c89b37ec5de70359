pub mod session_state;

pub use session_state::{IngestTicket, Mode, SessionState};
