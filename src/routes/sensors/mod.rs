mod handlers;
mod types;

pub use handlers::{
    create_measurement, create_sensor, delete_sensor, get_sensor, list_recent_by_type,
    list_sensor_measurements, list_sensors, sensor_summary, update_sensor,
};
pub use types::{
    MeasurementPayload, MeasurementResponse, RecentMeasurementResponse, SensorPayload,
    SensorResponse, SensorSummaryResponse, SensorTypeAverage, SensorTypeCount,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_measurement, __path_create_sensor, __path_delete_sensor, __path_get_sensor,
    __path_list_recent_by_type, __path_list_sensor_measurements, __path_list_sensors,
    __path_sensor_summary, __path_update_sensor,
};
