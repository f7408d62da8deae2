pub mod payload;
pub mod response;
pub mod result_item;
