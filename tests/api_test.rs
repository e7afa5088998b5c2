//! Router tests against a mocked MySQL connection.
//!
//! Run with: cargo test --test api_test

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, Transaction,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use raiztech_api::common::AppState;
use raiztech_api::config::Config;
use raiztech_api::entity::{
    DecisionType, IrrigatorStatus, SensorType, ai_decisions, farmers, irrigators, measurements,
    productivity_history, sectors, sensors, zones,
};
use raiztech_api::routes;

fn test_config() -> Config {
    Config {
        database_url: "mysql://root@localhost:3306/AgroTech".to_string(),
        db_max_connections: 1,
        run_migrations: false,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        static_dir: "static".to_string(),
    }
}

fn mysql() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::MySql)
}

fn connect(db: MockDatabase) -> Arc<DatabaseConnection> {
    Arc::new(db.into_connection())
}

fn app(db: &Arc<DatabaseConnection>) -> Router {
    routes::build_router(AppState::new(Arc::clone(db), test_config()))
}

/// Statements the router ran. Every router built on `db` must be gone.
fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::try_unwrap(db)
        .ok()
        .expect("router still holds the connection")
        .into_transaction_log()
}

/// Bound values of the `n`th statement in the log.
fn bound_values(log: &[Transaction], n: usize) -> Vec<sea_orm::Value> {
    log[n].statements()[0]
        .values
        .as_ref()
        .map(|values| values.0.clone())
        .unwrap_or_default()
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

fn farmer(id: i32) -> farmers::Model {
    farmers::Model {
        id,
        name: "Maria Souza".to_string(),
        tax_id: "123.456.789-01".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1980, 5, 1).unwrap(),
        phones: "(11) 98888-7777".to_string(),
    }
}

fn sensor(id: i32) -> sensors::Model {
    sensors::Model {
        id,
        sensor_type: SensorType::Humidity,
        manufacturer: Some("AgroSense".to_string()),
        property_id: 2,
    }
}

fn zone(id: i32) -> zones::Model {
    zones::Model {
        id,
        name: format!("Zona {id}"),
        area_hectares: 12.5,
        savings: 300.0,
        efficiency: Some(88.0),
        property_id: 2,
    }
}

fn sector(id: i32, humidity: f64) -> sectors::Model {
    sectors::Model {
        id,
        name: format!("Setor {id}"),
        crop_name: "Milho".to_string(),
        irrigation_duration: Some(30),
        last_irrigation: None,
        next_irrigation: None,
        current_humidity: Some(humidity),
        property_id: 1,
        zone_id: None,
    }
}

fn decision(id: i32, decided_at: NaiveDateTime) -> ai_decisions::Model {
    ai_decisions::Model {
        id,
        decided_at,
        description: format!("Decisão {id}"),
        decision_type: DecisionType::Optimization,
        confidence: 92.0,
        volume_saved: 120.0,
        zone_id: 1,
    }
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 15)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

// Farmers

#[tokio::test]
async fn missing_farmer_is_404() {
    let db = connect(mysql().append_query_results([Vec::<farmers::Model>::new()]));

    let (status, _, body) = send(app(&db), "GET", "/api/agricultores/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Agricultor não encontrado"}));
}

#[tokio::test]
async fn farmer_uses_column_names_on_the_wire() {
    let db = connect(mysql().append_query_results([vec![farmer(3)]]));

    let (status, _, body) = send(app(&db), "GET", "/api/agricultores/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ID_agricultor"], 3);
    assert_eq!(body["CPF"], "123.456.789-01");
    assert_eq!(body["data_nascimento"], "1980-05-01");
    assert_eq!(body["telefones_de_conato"], "(11) 98888-7777");
}

#[tokio::test]
async fn list_farmers_returns_every_row() {
    let db = connect(mysql().append_query_results([vec![farmer(1), farmer(2)]]));

    let (status, _, body) = send(app(&db), "GET", "/api/agricultores", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn create_farmer_without_cpf_is_rejected_before_insert() {
    let db = connect(mysql());

    let (status, _, body) = send(
        app(&db),
        "POST",
        "/api/agricultores",
        Some(r#"{"nome":"Maria","data_nascimento":"1980-05-01","telefones_de_conato":"11 9999"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Dados obrigatórios faltando"}));
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn create_farmer_returns_201_with_id() {
    let db = connect(mysql().append_exec_results([MockExecResult {
        last_insert_id: 15,
        rows_affected: 1,
    }]));

    let (status, _, body) = send(
        app(&db),
        "POST",
        "/api/agricultores",
        Some(
            r#"{"nome":"Maria","CPF":"12345678901","data_nascimento":"1980-05-01","telefones_de_conato":"11 9999"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"message": "Agricultor criado com sucesso", "id": 15})
    );
}

#[tokio::test]
async fn update_without_fields_is_rejected() {
    let db = connect(mysql().append_query_results([vec![farmer(3)]]));

    let (status, _, body) = send(app(&db), "PUT", "/api/agricultores/3", Some("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Nenhum campo para atualizar"}));
}

#[tokio::test]
async fn update_of_missing_farmer_is_404() {
    let db = connect(mysql().append_query_results([Vec::<farmers::Model>::new()]));

    let (status, _, _) = send(
        app(&db),
        "PUT",
        "/api/agricultores/42",
        Some(r#"{"nome":"Outro"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_farmer_is_404() {
    let db = connect(mysql().append_query_results([Vec::<farmers::Model>::new()]));

    let (status, _, body) = send(app(&db), "DELETE", "/api/agricultores/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Agricultor não encontrado");
    // Only the lookup ran; nothing was deleted.
    assert_eq!(transaction_log(db).len(), 1);
}

// Missing rows in the other CRUD groups

#[tokio::test]
async fn updates_of_missing_rows_are_404() {
    let cases = [
        ("/api/sensores/9", r#"{"fabricante":"X"}"#, "Sensor não encontrado"),
        ("/api/zonas/9", r#"{"nome":"X"}"#, "Zona não encontrada"),
        ("/api/irrigadores/9", r#"{"nome":"X"}"#, "Irrigador não encontrado"),
        ("/api/setores/9", r#"{"nome":"X"}"#, "Setor não encontrado"),
    ];

    for (uri, payload, message) in cases {
        // Zero rows decode as an empty result for any entity.
        let db = connect(mysql().append_query_results([Vec::<farmers::Model>::new()]));

        let (status, _, body) = send(app(&db), "PUT", uri, Some(payload)).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");
        assert_eq!(body, json!({"error": message}), "PUT {uri}");
        assert_eq!(transaction_log(db).len(), 1, "PUT {uri} must not write");
    }
}

#[tokio::test]
async fn deletes_of_missing_rows_are_404() {
    let cases = [
        ("/api/sensores/9", "Sensor não encontrado"),
        ("/api/zonas/9", "Zona não encontrada"),
        ("/api/irrigadores/9", "Irrigador não encontrado"),
        ("/api/setores/9", "Setor não encontrado"),
    ];

    for (uri, message) in cases {
        let db = connect(mysql().append_query_results([Vec::<farmers::Model>::new()]));

        let (status, _, body) = send(app(&db), "DELETE", uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
        assert_eq!(body, json!({"error": message}), "DELETE {uri}");
        assert_eq!(transaction_log(db).len(), 1, "DELETE {uri} must not write");
    }
}

#[tokio::test]
async fn scheduling_unknown_sector_is_404() {
    let db = connect(mysql().append_query_results([Vec::<sectors::Model>::new()]));

    let (status, _, body) = send(
        app(&db),
        "POST",
        "/api/setores/77/irrigacao",
        Some(r#"{"duracao_irrigacao":30}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Setor não encontrado"}));
    assert_eq!(transaction_log(db).len(), 1);
}

// Malformed requests

#[tokio::test]
async fn malformed_json_is_400_with_error_key() {
    let db = connect(mysql());

    let (status, _, body) =
        send(app(&db), "POST", "/api/agricultores", Some("{\"nome\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn non_numeric_ids_are_json_400() {
    let cases = [
        ("GET", "/api/agricultores/abc", None),
        ("DELETE", "/api/irrigadores/99999999999", None),
        ("PUT", "/api/irrigadores/x/status", Some(r#"{"status_":"Ativo"}"#)),
        ("POST", "/api/setores/1.5/irrigacao", Some(r#"{"duracao_irrigacao":30}"#)),
    ];

    for (method, uri, payload) in cases {
        let db = connect(mysql());

        let (status, _, body) = send(app(&db), method, uri, payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body, json!({"error": "Parâmetro de rota inválido"}), "{method} {uri}");
        assert!(transaction_log(db).is_empty(), "{method} {uri}");
    }
}

#[tokio::test]
async fn invalid_query_parameters_are_json_400() {
    let db = connect(mysql());

    let (status, _, body) = send(
        app(&db),
        "GET",
        "/api/history/productivity-evolution?months=muitos",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Parâmetros inválidos"));
}

#[tokio::test]
async fn driver_failure_is_500_with_endpoint_message() {
    let db = connect(
        mysql().append_query_errors([DbErr::Custom("connection reset".to_string())]),
    );

    let (status, _, body) = send(app(&db), "GET", "/api/zonas", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Erro ao buscar zonas"}));
}

// Irrigator status

#[tokio::test]
async fn unknown_irrigator_status_is_rejected() {
    let db = connect(mysql());

    let (status, _, body) = send(
        app(&db),
        "PUT",
        "/api/irrigadores/1/status",
        Some(r#"{"status_":"Quebrado"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    for label in ["Ativo", "Ocioso", "Manutenção"] {
        assert!(message.contains(label), "{message} should list {label}");
    }
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn irrigator_status_is_required() {
    let db = connect(mysql());

    let (status, _, body) =
        send(app(&db), "PUT", "/api/irrigadores/1/status", Some("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Status é obrigatório"}));
}

#[tokio::test]
async fn status_of_missing_irrigator_is_404() {
    let db = connect(mysql().append_query_results([Vec::<irrigators::Model>::new()]));

    let (status, _, body) = send(
        app(&db),
        "PUT",
        "/api/irrigadores/77/status",
        Some(r#"{"status_":"Ativo"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Irrigador não encontrado"}));
}

// Sectors

#[tokio::test]
async fn schedule_requires_duration() {
    let db = connect(mysql());

    let (status, _, body) = send(
        app(&db),
        "POST",
        "/api/setores/1/irrigacao",
        Some(r#"{"intervalo_horas":12}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Duração da irrigação é obrigatória"}));
}

// Sensors and measurements

#[tokio::test]
async fn measurement_history_joins_sensor_details() {
    let reading = measurements::Model {
        id: 10,
        taken_at: at(9, 30),
        value: 55.2,
        sensor_id: 1,
        property_id: 2,
    };
    let db = connect(
        mysql()
            .append_query_results([vec![sensor(1)]])
            .append_query_results([vec![reading]]),
    );

    let (status, _, body) =
        send(app(&db), "GET", "/api/sensores/1/medicoes?limit=5000", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["ID_medicao"], 10);
    assert_eq!(body[0]["sensor_tipo"], "Umidade");
    assert_eq!(body[0]["fabricante"], "AgroSense");
    assert_eq!(body[0]["data_hora"], "2025-09-15T09:30:00");
}

#[tokio::test]
async fn measurement_is_stamped_by_the_database_clock() {
    let db = connect(
        mysql()
            .append_query_results([vec![sensor(1)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 501,
                rows_affected: 1,
            }]),
    );

    let (status, _, body) = send(
        app(&db),
        "POST",
        "/api/medicoes",
        Some(r#"{"ID_sensor_fk":1,"ID_propriedade_fk":2,"valor_medicao":61.5}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Medição criada com sucesso"}));

    let log = transaction_log(db);
    assert_eq!(log.len(), 2);
    let insert = &log[1].statements()[0].sql;
    assert!(insert.starts_with("INSERT INTO `Medicao`"), "{insert}");
    assert!(insert.contains("CURRENT_TIMESTAMP"), "{insert}");
}

#[tokio::test]
async fn measurement_for_unknown_sensor_is_404_without_insert() {
    let db = connect(mysql().append_query_results([Vec::<sensors::Model>::new()]));

    let (status, _, body) = send(
        app(&db),
        "POST",
        "/api/medicoes",
        Some(r#"{"ID_sensor_fk":8,"ID_propriedade_fk":2,"valor_medicao":61.5}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Sensor não encontrado"}));
    assert_eq!(transaction_log(db).len(), 1);
}

#[tokio::test]
async fn recent_measurements_reject_unknown_type() {
    let db = connect(mysql());

    let (status, _, body) = send(
        app(&db),
        "GET",
        "/api/sensores/tipos/Vento/medicoes-recentes",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("LuzSolar"));
}

// Dashboards and reports

#[tokio::test]
async fn irrigation_stats_flag_placeholder_fields() {
    let counts = BTreeMap::from([
        ("total_sectors", sea_orm::Value::BigInt(Some(4))),
        ("active_sectors", sea_orm::Value::BigInt(Some(1))),
        ("next_irrigation_minutes", sea_orm::Value::BigInt(Some(45))),
    ]);
    let efficiency = BTreeMap::from([("value", sea_orm::Value::Double(Some(87.46)))]);
    let db = connect(
        mysql()
            .append_query_results([vec![counts]])
            .append_query_results([vec![efficiency]]),
    );

    let (status, headers, body) = send(app(&db), "GET", "/api/irrigation/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-placeholder-fields"], "dailyConsumption");
    assert_eq!(
        body,
        json!({
            "activeSectors": 1,
            "totalSectors": 4,
            "dailyConsumption": 2450,
            "nextIrrigationMinutes": 45,
            "avgEfficiency": 87.5
        })
    );
}

#[tokio::test]
async fn decision_flow_is_oldest_first() {
    let no_readings = || {
        BTreeMap::from([
            ("water_level", sea_orm::Value::Double(None)),
            ("soil_moisture", sea_orm::Value::Double(None)),
            ("ph", sea_orm::Value::Double(None)),
            ("temperature", sea_orm::Value::Double(None)),
            ("sun_intensity", sea_orm::Value::Double(None)),
        ])
    };
    // The query returns newest first.
    let db = connect(
        mysql()
            .append_query_results([vec![
                (decision(2, at(10, 45)), zone(1)),
                (decision(1, at(8, 5)), zone(1)),
            ]])
            .append_query_results([vec![no_readings()]])
            .append_query_results([vec![no_readings()]]),
    );

    let (status, headers, body) =
        send(app(&db), "GET", "/api/history/decision-flow", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-placeholder-fields"], "isRaining,duration");
    assert_eq!(body[0]["time"], "08:05");
    assert_eq!(body[0]["decision"], "Decisão 1");
    assert_eq!(body[1]["time"], "10:45");
    // No readings in the window: fallbacks apply.
    assert_eq!(body[0]["waterLevel"], 70);
    assert_eq!(body[0]["ph"], 6.5);
}

#[tokio::test]
async fn productivity_months_are_clamped() {
    for (months, limit) in [("500", 120u64), ("0", 1), ("-3", 1)] {
        let db = connect(
            mysql().append_query_results([Vec::<productivity_history::Model>::new()]),
        );

        let uri = format!("/api/history/productivity-evolution?months={months}");
        let (status, _, body) = send(app(&db), "GET", &uri, None).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["chartData"], json!([]), "{uri}");

        let log = transaction_log(db);
        assert!(
            bound_values(&log, 0).contains(&sea_orm::Value::BigUnsigned(Some(limit))),
            "{uri} should limit to {limit}"
        );
    }
}

#[tokio::test]
async fn learning_evolution_returns_oldest_month_first() {
    let month = |label: &str, decisions: i64, confidence: f64| {
        BTreeMap::from([
            ("month", sea_orm::Value::String(Some(Box::new(label.to_string())))),
            ("decisions", sea_orm::Value::BigInt(Some(decisions))),
            ("confidence", sea_orm::Value::Double(Some(confidence))),
        ])
    };
    let db = connect(mysql().append_query_results([vec![
        month("2025-09", 12, 91.04),
        month("2025-08", 30, 86.0),
    ]]));

    let (status, _, body) =
        send(app(&db), "GET", "/api/reports/learning-evolution", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"month": "2025-08", "Padrões": 30, "Eficiência (%)": 86.0},
            {"month": "2025-09", "Padrões": 12, "Eficiência (%)": 91.0}
        ])
    );
}

#[tokio::test]
async fn irrigator_details_list_battery_and_status() {
    let row = BTreeMap::from([
        ("id", sea_orm::Value::Int(Some(4))),
        ("name", sea_orm::Value::String(Some(Box::new("Pivô Norte".to_string())))),
        ("zone", sea_orm::Value::String(Some(Box::new("Zona Norte".to_string())))),
        ("culture", sea_orm::Value::String(None)),
        ("ai_status", sea_orm::Value::String(None)),
        ("efficiency", sea_orm::Value::Double(Some(91.5))),
        ("coverage", sea_orm::Value::Double(Some(8.0))),
        ("soil_moisture", sea_orm::Value::Double(None)),
        ("battery", sea_orm::Value::Int(Some(76))),
        ("last_decision", sea_orm::Value::String(None)),
        ("patterns_learned", sea_orm::Value::Int(None)),
        ("water_saved", sea_orm::Value::Double(Some(340.0))),
        ("status", sea_orm::Value::String(Some(Box::new("Manutenção".to_string())))),
    ]);
    let db = connect(mysql().append_query_results([vec![row]]));

    let (status, _, body) = send(app(&db), "GET", "/api/sensors/irrigators", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Pivô Norte");
    assert_eq!(body[0]["battery"], 76);
    assert_eq!(body[0]["waterSaved"], 340.0);
    assert_eq!(body[0]["culture"], Value::Null);
    assert_eq!(
        body[0]["status"],
        serde_json::to_value(IrrigatorStatus::Maintenance).unwrap()
    );
}

#[tokio::test]
async fn humid_sectors_get_delay_recommendation() {
    let db = connect(mysql().append_query_results([vec![sector(1, 82.0), sector(2, 40.0)]]));

    let (status, headers, body) =
        send(app(&db), "GET", "/api/weather/recommendations", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-placeholder-fields"], "savings");
    assert_eq!(body[0]["action"], "delay");
    assert_eq!(body[0]["savings"], "~500L");
    assert_eq!(body[1]["action"], "continue");
    assert_eq!(body[1]["savings"], Value::Null);
}

// Health and routing

#[tokio::test]
async fn health_reports_database_state() {
    let db = connect(mysql());

    let (status, _, body) = send(app(&db), "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let db = connect(mysql());

    let (status, _, body) = send(app(&db), "GET", "/api/nao-existe", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Rota não encontrada"}));
}
