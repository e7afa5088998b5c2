mod handlers;
mod types;

pub use handlers::{create_zone, delete_zone, get_zone, list_zones, update_zone};
pub use types::{ZonePayload, ZoneResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_zone, __path_delete_zone, __path_get_zone, __path_list_zones,
    __path_update_zone,
};
