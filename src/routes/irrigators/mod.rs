mod handlers;
mod types;

pub use handlers::{
    create_irrigator, delete_irrigator, get_irrigator, list_irrigators, update_irrigator,
    update_irrigator_status,
};
pub use types::{IrrigatorPayload, IrrigatorResponse, StatusPayload};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_irrigator, __path_delete_irrigator, __path_get_irrigator,
    __path_list_irrigators, __path_update_irrigator, __path_update_irrigator_status,
};
