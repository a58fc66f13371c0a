//! Tests de integración de la API
//!
//! Ejercitan el router real con `tower::ServiceExt::oneshot`, sin
//! levantar un servidor. Cada test construye su propia app con stores
//! en memoria vacíos.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use garage_backend::{config::environment::EnvironmentConfig, create_app, state::AppState};

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: "secreto-de-test".to_string(),
        jwt_expiration: 3600,
        cors_origins: Vec::new(),
        rate_limit_read_max: 10_000,
        rate_limit_read_window: 900,
        rate_limit_mutation_max: 10_000,
        rate_limit_mutation_window: 1800,
        openweather_api_key: None,
    }
}

fn test_app() -> Router {
    create_app(AppState::new(test_config()))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registrar un usuario y devolver un token válido
async fn authenticate(app: &Router) -> String {
    let register = json_request(
        "POST",
        "/api/auth/register",
        None,
        json!({ "email": "taller@garaje.es", "password": "segura123" }),
    );
    let response = app.clone().oneshot(register).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = json_request(
        "POST",
        "/api/auth/login",
        None,
        json!({ "email": "taller@garaje.es", "password": "segura123" }),
    );
    let response = app.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

async fn create_vehicle(app: &Router, token: &str, payload: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/vehicles", Some(token), payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get_request("/api/vehicles", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(get_request("/api/vehicles", Some("token-invalido")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app();
    authenticate(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "taller@garaje.es", "password": "incorrecta" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Credenciales inválidas");
}

#[tokio::test]
async fn test_create_vehicle_defaults_and_round_trip() {
    let app = test_app();
    let token = authenticate(&app).await;

    let created = create_vehicle(
        &app,
        &token,
        json!({
            "plate": "abc1234",
            "make": "Ferrari",
            "model": "488",
            "year": 2022,
            "tipo": "sport"
        }),
    )
    .await;

    // Placa normalizada a mayúsculas, estado inicial apagado y detenido
    assert_eq!(created["plate"], "ABC1234");
    assert_eq!(created["ignition"], false);
    assert_eq!(created["speed"], 0.0);
    assert_eq!(created["turboEngaged"], false);
    assert_eq!(created["currentLoad"], 0.0);
    assert_eq!(created["maintenance"], json!([]));

    let id = created["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/vehicles/{}", id), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_invalid_plate_rejected() {
    let app = test_app();
    let token = authenticate(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/vehicles",
            Some(&token),
            json!({
                "plate": "AB-1234",
                "make": "Seat",
                "model": "León",
                "year": 2020,
                "tipo": "standard"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_truck_requires_positive_capacity() {
    let app = test_app();
    let token = authenticate(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/vehicles",
            Some(&token),
            json!({
                "plate": "TRK0001",
                "make": "Volvo",
                "model": "FH16",
                "year": 2021,
                "tipo": "truck",
                "cargoCapacity": 0.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_plate_rejected() {
    let app = test_app();
    let token = authenticate(&app).await;

    create_vehicle(
        &app,
        &token,
        json!({
            "plate": "DUP0001",
            "make": "Seat",
            "model": "Ibiza",
            "year": 2019,
            "tipo": "standard"
        }),
    )
    .await;

    // Misma placa con otra capitalización
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/vehicles",
            Some(&token),
            json!({
                "plate": "dup0001",
                "make": "Seat",
                "model": "Arona",
                "year": 2023,
                "tipo": "standard"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = test_app();
    let token = authenticate(&app).await;

    create_vehicle(
        &app,
        &token,
        json!({
            "plate": "AAA0001",
            "make": "Seat",
            "model": "Ibiza",
            "year": 2019,
            "tipo": "standard"
        }),
    )
    .await;
    create_vehicle(
        &app,
        &token,
        json!({
            "plate": "BBB0002",
            "make": "Ferrari",
            "model": "488",
            "year": 2022,
            "tipo": "sport"
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request("/api/vehicles", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let plates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["plate"].as_str().unwrap())
        .collect();
    assert_eq!(plates, vec!["BBB0002", "AAA0001"]);
}

#[tokio::test]
async fn test_state_sync_returns_authoritative_record() {
    let app = test_app();
    let token = authenticate(&app).await;

    let created = create_vehicle(
        &app,
        &token,
        json!({
            "plate": "SPT0001",
            "make": "Ferrari",
            "model": "488",
            "year": 2022,
            "tipo": "sport"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/vehicles/{}/state", id),
            Some(&token),
            json!({ "ignition": true, "speed": 25.0, "turboEngaged": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["ignition"], true);
    assert_eq!(body["speed"], 25.0);
    assert_eq!(body["turboEngaged"], true);
    // Los campos descriptivos no se tocan
    assert_eq!(body["plate"], "SPT0001");
}

#[tokio::test]
async fn test_cargo_invariants_over_http() {
    let app = test_app();
    let token = authenticate(&app).await;

    let truck = create_vehicle(
        &app,
        &token,
        json!({
            "plate": "TRK0001",
            "make": "Volvo",
            "model": "FH16",
            "year": 2021,
            "tipo": "truck",
            "cargoCapacity": 1000.0
        }),
    )
    .await;
    let id = truck["id"].as_str().unwrap();
    let cargo_uri = format!("/api/vehicles/{}/cargo", id);

    // Cargar 600 sobre capacidad 1000
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &cargo_uri,
            Some(&token),
            json!({ "action": "load", "amount": 600.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["currentLoad"], 600.0);

    // Cargar 500 más excedería la capacidad
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &cargo_uri,
            Some(&token),
            json!({ "action": "load", "amount": 500.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");
    assert_eq!(body["message"], "Capacidad excedida");

    // Descargar 700 con solo 600 cargados
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &cargo_uri,
            Some(&token),
            json!({ "action": "unload", "amount": 700.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "INSUFFICIENT_LOAD");
    assert_eq!(body["message"], "Carga insuficiente");

    // Descargar los 600 deja la carga en cero
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &cargo_uri,
            Some(&token),
            json!({ "action": "unload", "amount": 600.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["currentLoad"], 0.0);
}

#[tokio::test]
async fn test_cargo_rejected_with_ignition_on() {
    let app = test_app();
    let token = authenticate(&app).await;

    let truck = create_vehicle(
        &app,
        &token,
        json!({
            "plate": "TRK0002",
            "make": "Scania",
            "model": "R500",
            "year": 2020,
            "tipo": "truck",
            "cargoCapacity": 800.0
        }),
    )
    .await;
    let id = truck["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/vehicles/{}/state", id),
            Some(&token),
            json!({ "ignition": true, "speed": 0.0, "turboEngaged": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/vehicles/{}/cargo", id),
            Some(&token),
            json!({ "action": "load", "amount": 100.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "INVALID_OPERATION");
}

#[tokio::test]
async fn test_maintenance_crud_returns_parent_vehicle() {
    let app = test_app();
    let token = authenticate(&app).await;

    let created = create_vehicle(
        &app,
        &token,
        json!({
            "plate": "MNT0001",
            "make": "Seat",
            "model": "León",
            "year": 2018,
            "tipo": "standard"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    // Agregar
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/vehicles/{}/maintenance", id),
            Some(&token),
            json!({
                "date": "2026-01-15",
                "serviceType": "Cambio de aceite",
                "cost": 89.5
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["maintenance"].as_array().unwrap().len(), 1);
    let record_id = body["maintenance"][0]["id"].as_str().unwrap().to_string();

    // Editar
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/vehicles/{}/maintenance/{}", id, record_id),
            Some(&token),
            json!({ "cost": 120.0, "description": "Incluye filtro" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["maintenance"][0]["cost"], 120.0);
    assert_eq!(body["maintenance"][0]["description"], "Incluye filtro");
    assert_eq!(body["maintenance"][0]["serviceType"], "Cambio de aceite");

    // Borrar
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/api/vehicles/{}/maintenance/{}", id, record_id));
    builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["maintenance"], json!([]));
}

#[tokio::test]
async fn test_technical_details_find_and_update() {
    let app = test_app();
    let token = authenticate(&app).await;

    // Primera búsqueda crea el registro con defaults
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/technical-details/find",
            Some(&token),
            json!({ "make": "Volvo", "model": "FH16" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["make"], "VOLVO");
    assert_eq!(body["nextServiceInterval"], "Cada 10.000 km");
    let id = body["id"].as_str().unwrap().to_string();

    // Segunda búsqueda devuelve el mismo registro
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/technical-details/find",
            Some(&token),
            json!({ "make": "volvo", "model": "fh16" }),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["id"].as_str().unwrap(), id);

    // Edición posterior
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/technical-details/{}", id),
            Some(&token),
            json!({ "nextServiceInterval": "Cada 20.000 km" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["nextServiceInterval"], "Cada 20.000 km");
}

#[tokio::test]
async fn test_delete_vehicle() {
    let app = test_app();
    let token = authenticate(&app).await;

    let created = create_vehicle(
        &app,
        &token,
        json!({
            "plate": "DEL0001",
            "make": "Seat",
            "model": "Ibiza",
            "year": 2017,
            "tipo": "standard"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/api/vehicles/{}", id));
    builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Vehículo eliminado.");

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/vehicles/{}", id), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    // El mensaje identifica el recurso y el id que no resolvió
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains(&format!("'{}'", id)));
}

#[tokio::test]
async fn test_mutation_rate_limit() {
    let mut config = test_config();
    config.rate_limit_mutation_max = 2;
    let app = create_app(AppState::new(config));

    let attempt = |n: u32| {
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "email": format!("user{}@garaje.es", n), "password": "segura123" }),
        )
    };

    for n in 0..2 {
        let mut request = attempt(n);
        request
            .headers_mut()
            .insert("x-forwarded-for", "9.9.9.9".parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let mut request = attempt(2);
    request
        .headers_mut()
        .insert("x-forwarded-for", "9.9.9.9".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response_json(response).await["code"],
        "RATE_LIMIT_EXCEEDED"
    );

    // Otra IP conserva su propia ventana
    let mut request = attempt(3);
    request
        .headers_mut()
        .insert("x-forwarded-for", "8.8.8.8".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
