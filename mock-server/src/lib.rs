//! In-memory stand-in for the SaludRural backend.
//!
//! Serves the `usuarios` and `citas` endpoints with the same paths, status
//! codes and `{"detail": ...}` error bodies as the real service, so the core
//! crate's integration tests exercise the full wire contract. Ids are
//! sequential integers; passwords are stored as given.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug)]
pub struct StoredUser {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    pub fecha_nacimiento: Option<String>,
    pub correo: String,
    pub telefono: Option<String>,
    pub contrasena: String,
    pub rol: String,
}

/// Response shape of the user endpoints; never carries the password.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    pub correo: String,
    pub telefono: Option<String>,
    pub rol: String,
}

impl From<&StoredUser> for UserView {
    fn from(u: &StoredUser) -> Self {
        Self {
            id_usuario: u.id_usuario,
            nombre: u.nombre.clone(),
            apellidos: u.apellidos.clone(),
            documento: u.documento.clone(),
            correo: u.correo.clone(),
            telefono: u.telefono.clone(),
            rol: u.rol.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    pub correo: String,
    #[serde(default)]
    pub telefono: Option<String>,
    pub contrasena: String,
    pub rol: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub correo: String,
    pub nueva_contrasena: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AgendaSlot {
    pub id_agenda: i64,
    pub id_medico: i64,
    pub fecha: String,
    pub hora: String,
    pub disponible: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Cita {
    pub id_cita: i64,
    pub estado: String,
    pub id_paciente: i64,
    pub id_medico: i64,
    pub fecha: String,
    pub hora: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCita {
    pub id_paciente: i64,
    pub id_agenda: i64,
    #[serde(default = "default_estado")]
    pub estado: String,
}

fn default_estado() -> String {
    "Programada".to_string()
}

#[derive(Debug, Default)]
pub struct Db {
    pub users: Vec<StoredUser>,
    pub citas: Vec<Cita>,
    pub agenda: Vec<AgendaSlot>,
    pub next_user_id: i64,
    pub next_cita_id: i64,
}

pub type SharedDb = Arc<RwLock<Db>>;

fn seeded_db() -> Db {
    let slot = |id_agenda, id_medico, fecha: &str, hora: &str| AgendaSlot {
        id_agenda,
        id_medico,
        fecha: fecha.to_string(),
        hora: hora.to_string(),
        disponible: true,
    };
    Db {
        agenda: vec![
            slot(1, 1, "2025-10-17", "09:00"),
            slot(2, 1, "2025-10-17", "10:00"),
            slot(3, 2, "2025-10-17", "11:00"),
            slot(4, 2, "2025-10-18", "09:00"),
            slot(5, 3, "2025-10-18", "15:00"),
        ],
        next_user_id: 1,
        next_cita_id: 1,
        ..Db::default()
    }
}

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(seeded_db()));
    Router::new()
        .route("/api/usuarios/", get(list_users).post(create_user))
        .route("/api/usuarios/login/", post(login))
        .route("/api/usuarios/buscar/", get(search_users))
        .route("/api/usuarios/reset_password/", post(reset_password))
        .route(
            "/api/usuarios/{id}/",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/citas/", get(list_citas).post(create_cita))
        .route("/api/citas/paciente/{id}/", get(citas_for_patient))
        .route("/api/citas/medico/{id}/", get(citas_for_doctor))
        .route("/api/citas/{id}/cancelar/", post(cancel_cita))
        .route("/api/citas/disponibilidad/{id}/", get(availability))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, msg: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": msg })))
}

// --- usuarios ---

async fn list_users(State(db): State<SharedDb>) -> Json<Vec<UserView>> {
    let db = db.read().await;
    Json(db.users.iter().map(UserView::from).collect())
}

async fn create_user(
    State(db): State<SharedDb>,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<UserView>), (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let duplicate = db
        .users
        .iter()
        .any(|u| u.correo == input.correo || u.documento == input.documento);
    if duplicate {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "Documento o correo ya existe",
        ));
    }
    let user = StoredUser {
        id_usuario: db.next_user_id,
        nombre: input.nombre,
        apellidos: input.apellidos,
        documento: input.documento,
        fecha_nacimiento: input.fecha_nacimiento,
        correo: input.correo,
        telefono: input.telefono,
        contrasena: input.contrasena,
        rol: input.rol,
    };
    db.next_user_id += 1;
    let view = UserView::from(&user);
    db.users.push(user);
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_user(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, (StatusCode, Json<Value>)> {
    let db = db.read().await;
    db.users
        .iter()
        .find(|u| u.id_usuario == id)
        .map(|u| Json(UserView::from(u)))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "No encontrado"))
}

async fn update_user(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<NewUser>,
) -> Result<Json<UserView>, (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let user = db
        .users
        .iter_mut()
        .find(|u| u.id_usuario == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "No encontrado"))?;
    user.nombre = input.nombre;
    user.apellidos = input.apellidos;
    user.documento = input.documento;
    user.fecha_nacimiento = input.fecha_nacimiento;
    user.correo = input.correo;
    user.telefono = input.telefono;
    user.contrasena = input.contrasena;
    // rol is ignored on update, matching the real service.
    Ok(Json(UserView::from(&*user)))
}

async fn delete_user(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let before = db.users.len();
    db.users.retain(|u| u.id_usuario != id);
    if db.users.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "No encontrado"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn login(
    State(db): State<SharedDb>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = db.read().await;
    let user = db
        .users
        .iter()
        .find(|u| u.correo == input.correo && u.contrasena == input.contrasena)
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Credenciales inválidas"))?;
    Ok(Json(json!({
        "id_usuario": user.id_usuario,
        "nombre": user.nombre,
        "apellidos": user.apellidos,
        "rol": user.rol,
        "correo": user.correo,
    })))
}

async fn reset_password(
    State(db): State<SharedDb>,
    Json(input): Json<ResetRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let user = db
        .users
        .iter_mut()
        .find(|u| u.correo == input.correo)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Correo no encontrado"))?;
    user.contrasena = input.nueva_contrasena;
    Ok(Json(json!({ "detail": "Contraseña actualizada correctamente" })))
}

async fn search_users(
    State(db): State<SharedDb>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, (StatusCode, Json<Value>)> {
    let q = params.get("q").cloned().unwrap_or_default();
    if q.is_empty() {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "Debe indicar un parámetro de búsqueda ?q=",
        ));
    }
    let q = q.to_lowercase();
    let db = db.read().await;
    let rows = db
        .users
        .iter()
        .filter(|u| {
            u.nombre.to_lowercase().contains(&q)
                || u.apellidos.to_lowercase().contains(&q)
                || u.correo.to_lowercase().contains(&q)
        })
        .map(|u| {
            json!({
                "id_usuario": u.id_usuario,
                "nombre": u.nombre,
                "apellidos": u.apellidos,
                "correo": u.correo,
                "rol": u.rol,
            })
        })
        .collect();
    Ok(Json(rows))
}

// --- citas ---

async fn list_citas(State(db): State<SharedDb>) -> Json<Vec<Cita>> {
    let db = db.read().await;
    Json(db.citas.clone())
}

async fn create_cita(
    State(db): State<SharedDb>,
    Json(input): Json<NewCita>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let slot = db
        .agenda
        .iter_mut()
        .find(|s| s.id_agenda == input.id_agenda)
        .ok_or_else(|| detail(StatusCode::BAD_REQUEST, "Error: agenda no encontrada"))?;
    if !slot.disponible {
        return Err(detail(StatusCode::BAD_REQUEST, "Error: agenda no disponible"));
    }
    slot.disponible = false;
    let (id_medico, fecha, hora) = (slot.id_medico, slot.fecha.clone(), slot.hora.clone());

    let cita = Cita {
        id_cita: db.next_cita_id,
        estado: input.estado,
        id_paciente: input.id_paciente,
        id_medico,
        fecha,
        hora,
    };
    db.next_cita_id += 1;
    let id = cita.id_cita;
    db.citas.push(cita);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id_cita": id, "mensaje": "Cita agendada exitosamente" })),
    ))
}

async fn citas_for_patient(State(db): State<SharedDb>, Path(id): Path<i64>) -> Json<Vec<Cita>> {
    let db = db.read().await;
    Json(
        db.citas
            .iter()
            .filter(|c| c.id_paciente == id)
            .cloned()
            .collect(),
    )
}

async fn citas_for_doctor(State(db): State<SharedDb>, Path(id): Path<i64>) -> Json<Vec<Cita>> {
    let db = db.read().await;
    Json(
        db.citas
            .iter()
            .filter(|c| c.id_medico == id)
            .cloned()
            .collect(),
    )
}

async fn cancel_cita(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut db = db.write().await;
    let cita = db
        .citas
        .iter_mut()
        .find(|c| c.id_cita == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Cita no encontrada"))?;
    cita.estado = "Cancelada".to_string();
    Ok(Json(json!({ "mensaje": "Cita cancelada exitosamente" })))
}

async fn availability(State(db): State<SharedDb>, Path(id): Path<i64>) -> Json<Vec<AgendaSlot>> {
    let db = db.read().await;
    Json(
        db.agenda
            .iter()
            .filter(|s| s.id_medico == id)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_view_never_carries_the_password() {
        let user = StoredUser {
            id_usuario: 1,
            nombre: "Ana".to_string(),
            apellidos: "Pérez".to_string(),
            documento: "CC-1".to_string(),
            fecha_nacimiento: None,
            correo: "ana@example.com".to_string(),
            telefono: None,
            contrasena: "secreta".to_string(),
            rol: "Paciente".to_string(),
        };
        let json = serde_json::to_value(UserView::from(&user)).unwrap();
        assert!(json.get("contrasena").is_none());
        assert_eq!(json["correo"], "ana@example.com");
    }

    #[test]
    fn new_cita_defaults_estado_to_programada() {
        let input: NewCita =
            serde_json::from_str(r#"{"id_paciente":1,"id_agenda":2}"#).unwrap();
        assert_eq!(input.estado, "Programada");
    }

    #[test]
    fn new_user_rejects_missing_required_fields() {
        let result: Result<NewUser, _> =
            serde_json::from_str(r#"{"nombre":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_agenda_is_initially_open() {
        let db = seeded_db();
        assert!(!db.agenda.is_empty());
        assert!(db.agenda.iter().all(|s| s.disponible));
    }
}
