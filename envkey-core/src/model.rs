use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENV: &str = "default";
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Ci,
    Readonly,
}

impl Role {
    pub fn can_set(self) -> bool {
        matches!(self, Role::Admin | Role::Member)
    }

    pub fn can_rm(self) -> bool {
        matches!(self, Role::Admin | Role::Member)
    }

    pub fn can_rotate(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_manage_members(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_read_metadata(self) -> bool {
        matches!(self, Role::Admin | Role::Member | Role::Readonly)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretKind {
    String,
    File,
}

impl Default for SecretKind {
    fn default() -> Self {
        SecretKind::String
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub pubkey: String,
    pub role: Role,
    pub added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<String>>,
}

impl Member {
    /// The entitlement set this member carries, with role defaults applied.
    ///
    /// Admins implicitly carry "all" and are handled separately by the
    /// access policy; this only resolves the explicit/default set used for
    /// non-admin roles.
    pub fn entitlement(&self) -> Vec<String> {
        match &self.environments {
            Some(envs) => envs.clone(),
            None => vec![DEFAULT_ENV.to_string()],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SecretEntry {
    pub value: String,
    pub set_by: String,
    pub modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SecretKind>,
}

impl SecretEntry {
    pub fn kind(&self) -> SecretKind {
        self.kind.clone().unwrap_or_default()
    }
}

pub type Environment = BTreeMap<String, SecretEntry>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    pub team: Vec<Member>,
    pub environments: BTreeMap<String, Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Document {
    pub fn new_empty() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(DEFAULT_ENV.to_string(), Environment::new());
        Document { version: DOCUMENT_VERSION, team: Vec::new(), environments, metadata: None }
    }

    pub fn find_member(&self, name: &str) -> Option<&Member> {
        self.team.iter().find(|m| m.name == name)
    }

    pub fn find_member_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.team.iter_mut().find(|m| m.name == name)
    }

    pub fn admin_count(&self) -> usize {
        self.team.iter().filter(|m| m.role == Role::Admin).count()
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    pub fn environment_mut(&mut self, name: &str) -> &mut Environment {
        self.environments.entry(name.to_string()).or_default()
    }
}
