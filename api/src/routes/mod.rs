pub mod ask_route;
pub mod clear_route;
pub mod page_route;
pub mod text_route;
pub mod upload_route;
