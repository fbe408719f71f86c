//! Domain entities - Events read from the provider and requests sent back to it

mod outbound_request;
mod parsed_event;

pub use outbound_request::{DocumentMessage, OutboundRequest, TextMessage};
pub use parsed_event::{DeliveryUpdate, InboundMessage, ParsedEvent};
