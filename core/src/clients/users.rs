//! Remote-backed user operations.
//!
//! Every verb forwards to the transport wrapper with a literal path; the
//! only extra behavior is `login`, which persists the returned record in the
//! session store so the guards see it.

use serde::Deserialize;

use crate::api::{encode_query, Api};
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::types::{Credentials, NewUser, PasswordReset, SessionUser, User, UserSummary};

/// `{"detail": "..."}` bodies carried by non-record responses.
#[derive(Debug, Deserialize)]
struct DetailMessage {
    detail: String,
}

#[derive(Clone)]
pub struct UsersClient {
    api: Api,
    session: SessionStore,
}

impl UsersClient {
    pub fn new(api: Api, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Authenticate and cache the session record.
    pub fn login(&self, correo: &str, contrasena: &str) -> Result<SessionUser, ApiError> {
        let body = Credentials {
            correo: correo.to_string(),
            contrasena: contrasena.to_string(),
        };
        let user: SessionUser = self.api.post("/usuarios/login/", &body)?;
        self.session.save_user(&user)?;
        Ok(user)
    }

    pub fn register(&self, input: &NewUser) -> Result<User, ApiError> {
        self.api.post("/usuarios/", input)
    }

    pub fn list(&self) -> Result<Vec<User>, ApiError> {
        self.api.get("/usuarios/")
    }

    pub fn get(&self, id: i64) -> Result<User, ApiError> {
        self.api.get(&format!("/usuarios/{id}/"))
    }

    pub fn update(&self, id: i64, input: &NewUser) -> Result<User, ApiError> {
        self.api.put(&format!("/usuarios/{id}/"), input)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("/usuarios/{id}/"))
    }

    pub fn search(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        self.api
            .get(&format!("/usuarios/buscar/?q={}", encode_query(query)))
    }

    /// Returns the backend's confirmation message.
    pub fn reset_password(
        &self,
        correo: &str,
        nueva_contrasena: &str,
    ) -> Result<String, ApiError> {
        let body = PasswordReset {
            correo: correo.to_string(),
            nueva_contrasena: nueva_contrasena.to_string(),
        };
        let msg: DetailMessage = self.api.post("/usuarios/reset_password/", &body)?;
        Ok(msg.detail)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
    use crate::session::NullNavigator;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::types::Role;

    struct CannedTransport {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                },
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(req.clone());
            Ok(self.response.clone())
        }
    }

    fn client(
        transport: Arc<CannedTransport>,
    ) -> (UsersClient, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        let session = SessionStore::new(kv.clone(), Arc::new(NullNavigator));
        let api = Api::new("http://localhost:8000/api", transport);
        (UsersClient::new(api, session), kv)
    }

    #[test]
    fn login_persists_the_session_record() {
        let transport = Arc::new(CannedTransport::new(
            200,
            r#"{"id_usuario":5,"nombre":"Ana","apellidos":"Pérez","rol":"Paciente","correo":"ana@example.com"}"#,
        ));
        let (client, kv) = client(transport.clone());

        let user = client.login("ana@example.com", "secreta").unwrap();
        assert_eq!(user.id_usuario, 5);
        assert_eq!(user.rol, Role::Paciente);

        let stored: SessionUser =
            serde_json::from_str(&kv.get("sr_user").unwrap()).unwrap();
        assert_eq!(stored, user);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].url, "http://localhost:8000/api/usuarios/login/");
        let body: serde_json::Value =
            serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["correo"], "ana@example.com");
    }

    #[test]
    fn failed_login_leaves_no_session() {
        let transport = Arc::new(CannedTransport::new(
            401,
            r#"{"detail":"Credenciales inválidas"}"#,
        ));
        let (client, kv) = client(transport);
        let err = client.login("ana@example.com", "mala").unwrap_err();
        assert_eq!(err.to_string(), "Credenciales inválidas");
        assert!(kv.get("sr_user").is_none());
    }

    #[test]
    fn search_percent_encodes_the_query() {
        let transport = Arc::new(CannedTransport::new(200, "[]"));
        let (client, _) = client(transport.clone());
        client.search("ana pérez").unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(
            seen[0].url,
            "http://localhost:8000/api/usuarios/buscar/?q=ana%20p%C3%A9rez"
        );
    }

    #[test]
    fn delete_issues_the_verb_on_the_id_path() {
        let transport = Arc::new(CannedTransport::new(204, ""));
        let (client, _) = client(transport.clone());
        client.delete(9).unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Delete);
        assert_eq!(seen[0].url, "http://localhost:8000/api/usuarios/9/");
    }

    #[test]
    fn reset_password_returns_the_confirmation() {
        let transport = Arc::new(CannedTransport::new(
            200,
            r#"{"detail":"Contraseña actualizada correctamente"}"#,
        ));
        let (client, _) = client(transport);
        let msg = client.reset_password("ana@example.com", "nueva").unwrap();
        assert_eq!(msg, "Contraseña actualizada correctamente");
    }
}
