mod handlers;
mod types;

pub use handlers::{
    create_sector, delete_sector, get_sector, list_sectors, schedule_irrigation, update_sector,
};
pub use types::{SchedulePayload, SectorPayload, SectorResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_sector, __path_delete_sector, __path_get_sector, __path_list_sectors,
    __path_schedule_irrigation, __path_update_sector,
};
