mod handlers;
mod types;

pub use handlers::{create_farmer, delete_farmer, get_farmer, list_farmers, update_farmer};
pub use types::{FarmerPayload, FarmerResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_farmer, __path_delete_farmer, __path_get_farmer, __path_list_farmers,
    __path_update_farmer,
};
