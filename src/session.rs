use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ZvitError};
use crate::settings::config_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Administrator,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manager => "Менеджер",
            Self::Administrator => "Адміністратор",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Менеджер" => Some(Self::Manager),
            "Адміністратор" => Some(Self::Administrator),
            _ => None,
        }
    }
}

/// The signed-in user, passed explicitly to whatever needs it.
/// Acquired by `login`, persisted next to the settings, invalidated by
/// `logout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
    pub signed_in_at: String,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn generate_salt() -> String {
    use rand::Rng;
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

pub fn add_user(conn: &Connection, email: &str, password: &str, role: Role) -> Result<()> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);
    conn.execute(
        "INSERT INTO users (email, password_hash, salt, role) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![email, hash, salt, role.label()],
    )?;
    Ok(())
}

pub fn user_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM users", [], |row| row.get(0))?)
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, email, role FROM users ORDER BY id")?;
    let rows: Vec<User> = stmt
        .query_map([], |row| {
            let role_label: String = row.get(2)?;
            Ok(User {
                id: row.get(0)?,
                email: row.get(1)?,
                role: Role::parse(&role_label).unwrap_or(Role::Manager),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Verify email + password against the users table.
pub fn sign_in(conn: &Connection, email: &str, password: &str) -> Result<Session> {
    let row: std::result::Result<(String, String, String), _> = conn.query_row(
        "SELECT password_hash, salt, role FROM users WHERE email = ?1",
        [email],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    );
    let (stored_hash, salt, role_label) =
        row.map_err(|_| ZvitError::UnknownUser(email.to_string()))?;

    if hash_password(password, &salt) != stored_hash {
        return Err(ZvitError::Auth("Невірний email або пароль".to_string()));
    }

    Ok(Session {
        email: email.to_string(),
        role: Role::parse(&role_label).unwrap_or(Role::Manager),
        signed_in_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    })
}

// ---------------------------------------------------------------------------
// Session file lifecycle
// ---------------------------------------------------------------------------

fn session_path() -> std::path::PathBuf {
    config_dir().join("session.json")
}

pub fn save_session(session: &Session) -> Result<()> {
    std::fs::create_dir_all(config_dir())?;
    let json = serde_json::to_string_pretty(session)
        .map_err(|e| ZvitError::Settings(e.to_string()))?;
    std::fs::write(session_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn current_session() -> Option<Session> {
    let content = std::fs::read_to_string(session_path()).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn clear_session() -> Result<()> {
    let path = session_path();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

pub fn require_session() -> Result<Session> {
    current_session().ok_or_else(|| {
        ZvitError::Auth("Потрібно увійти в систему: zvit login".to_string())
    })
}

pub fn require_admin() -> Result<Session> {
    let session = require_session()?;
    if session.role != Role::Administrator {
        return Err(ZvitError::Auth(
            "У вас немає доступу до адмін-панелі".to_string(),
        ));
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_hash_depends_on_salt() {
        let a = hash_password("секрет", "aaaa");
        let b = hash_password("секрет", "bbbb");
        assert_ne!(a, b);
        assert_eq!(a, hash_password("секрет", "aaaa"));
    }

    #[test]
    fn test_sign_in_happy_path() {
        let (_dir, conn) = test_db();
        add_user(&conn, "admin@bank.ua", "пароль123", Role::Administrator).unwrap();
        let session = sign_in(&conn, "admin@bank.ua", "пароль123").unwrap();
        assert_eq!(session.email, "admin@bank.ua");
        assert_eq!(session.role, Role::Administrator);
    }

    #[test]
    fn test_sign_in_rejects_wrong_password() {
        let (_dir, conn) = test_db();
        add_user(&conn, "admin@bank.ua", "пароль123", Role::Administrator).unwrap();
        let result = sign_in(&conn, "admin@bank.ua", "інший");
        assert!(matches!(result, Err(ZvitError::Auth(_))));
    }

    #[test]
    fn test_sign_in_unknown_user() {
        let (_dir, conn) = test_db();
        let result = sign_in(&conn, "nobody@bank.ua", "пароль");
        assert!(matches!(result, Err(ZvitError::UnknownUser(_))));
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (_dir, conn) = test_db();
        add_user(&conn, "admin@bank.ua", "пароль123", Role::Administrator).unwrap();
        assert!(add_user(&conn, "admin@bank.ua", "інший", Role::Manager).is_err());
    }

    #[test]
    fn test_role_labels_roundtrip() {
        assert_eq!(Role::parse("Менеджер"), Some(Role::Manager));
        assert_eq!(Role::parse("Адміністратор"), Some(Role::Administrator));
        assert_eq!(Role::parse("щось інше"), None);
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = Session {
            email: "admin@bank.ua".to_string(),
            role: Role::Administrator,
            signed_in_at: "2024-01-15T09:30:00".to_string(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.email, session.email);
        assert_eq!(back.role, session.role);
    }
}
