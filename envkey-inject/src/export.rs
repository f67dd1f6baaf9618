use std::collections::BTreeMap;
use std::fmt;

use envkey_core::{Actor, DocumentFile, EnvkeyError};

use crate::decrypt::decrypt_environment;

/// Output formats for `export`, per §4.6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Env,
    Json,
    Docker,
    K8sSecret,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportFormat::Env => "env",
            ExportFormat::Json => "json",
            ExportFormat::Docker => "docker",
            ExportFormat::K8sSecret => "k8s-secret",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "env" => Ok(ExportFormat::Env),
            "json" => Ok(ExportFormat::Json),
            "docker" => Ok(ExportFormat::Docker),
            "k8s-secret" => Ok(ExportFormat::K8sSecret),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// `export(env, format)` — §4.6. Renders the decrypted map as text; callers
/// write the result to stdout.
pub fn export(file: &DocumentFile, env: &str, format: ExportFormat, actor: &Actor) -> Result<String, EnvkeyError> {
    let decrypted = decrypt_environment(file, env, actor)?;
    let values: BTreeMap<String, String> = decrypted
        .into_iter()
        .map(|(k, v)| (k, String::from_utf8_lossy(&v.plaintext).into_owned()))
        .collect();

    Ok(match format {
        ExportFormat::Env => render_env(&values),
        ExportFormat::Json => render_json(&values),
        ExportFormat::Docker => render_docker(&values),
        ExportFormat::K8sSecret => render_k8s_secret(env, &values),
    })
}

fn render_env(values: &BTreeMap<String, String>) -> String {
    values
        .iter()
        .map(|(k, v)| format!("{}='{}'", k, v.replace('\'', "'\\''")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(values: &BTreeMap<String, String>) -> String {
    serde_json::to_string_pretty(values).expect("string map always serializes")
}

fn render_docker(values: &BTreeMap<String, String>) -> String {
    values.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("\n")
}

fn render_k8s_secret(env: &str, values: &BTreeMap<String, String>) -> String {
    let data: BTreeMap<String, String> = values
        .iter()
        .map(|(k, v)| (k.clone(), base64::Engine::encode(&base64::engine::general_purpose::STANDARD, v.as_bytes())))
        .collect();

    let manifest = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": { "name": format!("envkey-{env}") },
        "type": "Opaque",
        "data": data,
    });
    serde_json::to_string_pretty(&manifest).expect("manifest always serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use envkey_core::{set, Member, Role};
    use envkey_crypto::Identity;

    fn admin(identity: &Identity) -> Member {
        Member { name: "alice".to_string(), pubkey: identity.to_recipient().to_string(), role: Role::Admin, added: Utc::now().date_naive(), environments: None }
    }

    fn fixture() -> (DocumentFile, Identity) {
        let identity = Identity::generate();
        let mut file = DocumentFile::new_empty();
        file.doc.team.push(admin(&identity));
        let member = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: member.clone(), identity: &identity };
        set(&mut file, "default", "API_KEY", b"it's-a-secret", &actor).unwrap();
        (file, identity)
    }

    #[test]
    fn env_format_single_quotes_and_escapes() {
        let (file, identity) = fixture();
        let member = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: member.clone(), identity: &identity };
        let rendered = export(&file, "default", ExportFormat::Env, &actor).unwrap();
        assert_eq!(rendered, "API_KEY='it'\\''s-a-secret'");
    }

    #[test]
    fn json_format_is_a_string_map() {
        let (file, identity) = fixture();
        let member = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: member.clone(), identity: &identity };
        let rendered = export(&file, "default", ExportFormat::Json, &actor).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.get("API_KEY").unwrap(), "it's-a-secret");
    }

    #[test]
    fn k8s_secret_base64_encodes_values() {
        let (file, identity) = fixture();
        let member = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: member.clone(), identity: &identity };
        let rendered = export(&file, "default", ExportFormat::K8sSecret, &actor).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["kind"], "Secret");
        let encoded = parsed["data"]["API_KEY"].as_str().unwrap();
        let decoded = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, encoded).unwrap();
        assert_eq!(decoded, b"it's-a-secret");
    }

    #[test]
    fn format_round_trips_through_display_and_fromstr() {
        use std::str::FromStr;
        for f in [ExportFormat::Env, ExportFormat::Json, ExportFormat::Docker, ExportFormat::K8sSecret] {
            assert_eq!(ExportFormat::from_str(&f.to_string()).unwrap(), f);
        }
    }
}
