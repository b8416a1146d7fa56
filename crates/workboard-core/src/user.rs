//! Office staff records.

use serde::{Deserialize, Serialize};

use crate::task::deserialize_id;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[serde(rename = "Super Admin", alias = "SuperAdmin", alias = "super_admin")]
    SuperAdmin,
    /// Supervisor.
    #[serde(alias = "atasan")]
    Atasan,
    #[default]
    #[serde(alias = "staff")]
    Staff,
}

/// A member of staff. Workload and leaderboard rows are keyed by `name`,
/// which is what task PIC fields refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jabatan: Option<String>,
}

impl User {
    pub fn new(id: &str, name: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role,
            jabatan: None,
        }
    }

    pub fn with_jabatan(mut self, jabatan: &str) -> Self {
        self.jabatan = Some(jabatan.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_roles_and_optional_jabatan() {
        let user: User = serde_json::from_value(json!({
            "id": 3, "name": "Sari", "role": "Super Admin", "jabatan": "Kasubag Umum"
        }))
        .unwrap();
        assert_eq!(user.id, "3");
        assert_eq!(user.role, Role::SuperAdmin);
        assert_eq!(user.jabatan.as_deref(), Some("Kasubag Umum"));

        let user: User = serde_json::from_value(json!({"id": "u", "name": "Budi"})).unwrap();
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.jabatan, None);
    }

    #[test]
    fn role_serializes_with_display_name() {
        let json = serde_json::to_value(User::new("1", "Andi", Role::SuperAdmin)).unwrap();
        assert_eq!(json["role"], "Super Admin");
        assert!(json.get("jabatan").is_none());

        let json =
            serde_json::to_value(User::new("2", "Sari", Role::Atasan).with_jabatan("Kepala Seksi"))
                .unwrap();
        assert_eq!(json["role"], "Atasan");
        assert_eq!(json["jabatan"], "Kepala Seksi");
    }
}
