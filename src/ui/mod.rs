pub mod alert;
pub mod confetti;
pub mod layout;
mod menu;
pub mod progress;
mod quiz;
mod review;
pub mod theme;

pub use alert::draw_alert;
pub use confetti::draw_confetti;
pub use layout::{calculate_menu_chunks, calculate_review_chunks, centered_rect};
pub use menu::{draw_menu, draw_status, draw_upload_prompt, help_line};
pub use progress::draw_progress;
pub use quiz::draw_quiz_modal;
pub use review::draw_review;
pub use theme::Theme;
