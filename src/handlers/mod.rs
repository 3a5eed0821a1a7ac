mod home;
pub mod products;

pub use home::{WELCOME_MESSAGE, index, not_found};
pub use products::{create_product, delete_product, get_product, list_products, update_product};
