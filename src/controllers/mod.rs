pub mod home_controller;
pub mod order_controller;
pub mod book_controller;
