pub mod generate;
pub mod rest;
pub mod state;

// Re-export the handlers so the binary that builds the router can reach
// them without digging through submodules.
pub use rest::{
    booking_back_handler, coach_availability_handler, confirm_booking_handler,
    create_session_handler, generate_article_handler, generate_plan_handler, get_session_handler,
    list_coaches_handler, list_topics_handler, navigate_handler, select_coach_handler,
    select_date_handler, select_slot_handler,
};
