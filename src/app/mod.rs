pub mod ports;
pub mod view;
pub mod session;
pub mod listing_use_case;
pub mod detail_use_case;
pub mod create_event_use_case;
