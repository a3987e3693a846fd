// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taller_api::models::{
    OrderDetailPayload, ServicePayload, ServiceRecord, VehicleRecord,
};
use taller_api::resources::{INVENTORY, SERVICES, VEHICLES};
use taller_api::{ApiClient, Error, TokenSlot};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client =
        ApiClient::with_client(reqwest::Client::new(), &server.uri(), TokenSlot::new()).unwrap();
    (server, client)
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Usuario/login"))
        .and(body_json(json!({"nombreUsuario": "admin", "contrasena": "secreto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "usuario": {"idUsuario": 1, "nombreUsuario": "admin", "idRol": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/Vehiculo"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let login = client.login("admin", &secret("secreto")).await.unwrap();
    assert_eq!(login.token, "tok-123");
    assert_eq!(login.usuario.map(|u| u.id_usuario), Some(1));
    assert_eq!(client.token().as_deref(), Some("tok-123"));

    let list: Vec<VehicleRecord> = client.list_records(VEHICLES, &[]).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_login_rejected_carries_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Usuario/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Usuario o contraseña incorrectos"})),
        )
        .mount(&server)
        .await;

    let err = client.login("admin", &secret("mal")).await.unwrap_err();
    match err {
        Error::Authentication { message } => {
            assert_eq!(message, "Usuario o contraseña incorrectos");
        }
        other => panic!("expected Authentication, got {other:?}"),
    }
    assert!(!client.token_slot().is_set());
}

#[tokio::test]
async fn test_current_user_without_token_skips_network() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Usuario/current"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(client.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_user_expired_token_is_none() {
    let (server, client) = setup().await;
    client.token_slot().set(secret("stale"));

    Mock::given(method("GET"))
        .and(path("/Usuario/current"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(client.current_user().await.unwrap().is_none());
}

// ── CRUD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_posts_payload_and_returns_record() {
    let (server, client) = setup().await;

    let payload = ServicePayload {
        nombre: "Cambio de aceite".into(),
        descripcion: String::new(),
        costo: 250.0,
        duracion: "30 minutos".into(),
        activo: true,
    };

    Mock::given(method("POST"))
        .and(path("/api/Servicio"))
        .and(body_json(json!({
            "nombre": "Cambio de aceite",
            "descripcion": "",
            "costo": 250.0,
            "duracion": "30 minutos",
            "activo": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "idServicio": 7,
            "nombre": "Cambio de aceite",
            "costo": 250.0,
            "duracion": "30 minutos",
            "activo": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created: Option<ServiceRecord> =
        client.create_record(SERVICES, &payload).await.unwrap();
    assert_eq!(created.map(|s| s.id_servicio), Some(7));
}

#[tokio::test]
async fn test_update_with_no_content_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/Vehiculo/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let updated: Option<VehicleRecord> = client
        .update_record(VEHICLES, 3, &json!({"marca": "Kia"}))
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_get_missing_record_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/Vehiculo/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .get_record::<VehicleRecord>(VEHICLES, 99)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_error_carries_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/Vehiculo/5"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "El vehículo tiene órdenes asociadas"})),
        )
        .mount(&server)
        .await;

    let err = client.delete_record(VEHICLES, 5).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "El vehículo tiene órdenes asociadas");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/Vehiculo"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .list_records::<VehicleRecord>(VEHICLES, &[])
        .await
        .unwrap_err();
    assert!(err.is_auth_expired());
}

#[tokio::test]
async fn test_list_forwards_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/Vehiculo"))
        .and(query_param("idUsuario", "4"))
        .and(query_param("marca", "Mazda"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"idVehiculo": 7, "idUsuario": 4, "marca": "Mazda"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let params = vec![
        ("idUsuario".to_owned(), "4".to_owned()),
        ("marca".to_owned(), "Mazda".to_owned()),
    ];
    let list: Vec<VehicleRecord> = client.list_records(VEHICLES, &params).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id_vehiculo, 7);
}

// ── Extras ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_low_stock_sends_threshold() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/Inventario/low-stock"))
        .and(query_param("threshold", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "name": "Filtro de aire", "category": "Filtros", "quantity": 3,
             "unit": "Unidad", "minQuantity": 5}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items = client.low_stock(5).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, Some(3));
    assert_eq!(items[0].min_quantity, Some(5));
}

#[tokio::test]
async fn test_status_patch_and_quantity_bodies() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/Servicio/4/status"))
        .and(body_json(json!({"activo": false})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/{INVENTORY}/8/quantity")))
        .and(body_json(json!({"quantity": 12})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_service_status(4, false).await.unwrap();
    client.set_inventory_quantity(8, 12).await.unwrap();
}

#[tokio::test]
async fn test_order_detail_lifecycle_paths() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/Orden/10/details"))
        .and(body_json(json!({"idServicio": 3, "cantidad": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "idDetalle": 41, "idOrden": 10, "idServicio": 3, "cantidad": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/Orden/10/details/41"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let detail = OrderDetailPayload {
        id_servicio: 3,
        cantidad: 2,
        precio_unitario: None,
    };
    let added = client.add_order_detail(10, &detail).await.unwrap();
    assert_eq!(added.map(|d| d.id_detalle), Some(41));
    client.remove_order_detail(10, 41).await.unwrap();
}

#[tokio::test]
async fn test_vehicle_maintenance_history() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/Vehiculo/1/maintenance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "vehicle": "Toyota Corolla (ABC-123)", "date": "2023-05-10",
             "type": "Cambio de aceite", "cost": 250.0, "status": "Completado",
             "details": "Aceite sintético 5W-30"}
        ])))
        .mount(&server)
        .await;

    let history = client.vehicle_maintenance(1).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status.as_deref(), Some("Completado"));
}
