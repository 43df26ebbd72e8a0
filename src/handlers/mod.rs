/// Handlers for inbound messages and roster queries
mod message;
mod query;

pub use message::handle_inbound_message;
pub use query::{QueryCommand, respond, respond_to_structured};
