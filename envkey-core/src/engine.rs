use chrono::Utc;

use envkey_crypto::{Identity, Recipient};

use crate::access::{self, Operation};
use crate::document::{unwrap_base64, wrap_base64, DocumentFile};
use crate::error::EnvkeyError;
use crate::model::{Member, Role, SecretEntry, SecretKind};

/// The team member performing an operation, paired with their decrypt
/// capability.
///
/// `member` is owned rather than borrowed from the document: callers
/// typically resolve it by looking up a document's team list, but every
/// operation here takes `&mut DocumentFile` to mutate that same document,
/// and a borrow of one of its fields can't coexist with that. Cloning a
/// `Member` out before mutating is cheap and keeps the API usable without
/// fighting the borrow checker at every call site.
pub struct Actor<'a> {
    pub member: Member,
    pub identity: &'a Identity,
}

impl<'a> std::fmt::Debug for Actor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("member", &self.member)
            .field("identity", &"<redacted>")
            .finish()
    }
}

fn encrypt_for(doc: &crate::model::Document, env: &str, plaintext: &[u8]) -> Result<String, EnvkeyError> {
    let recipients = access::recipient_set(doc, env)?;
    if recipients.is_empty() {
        return Err(EnvkeyError::NoRecipients(env.to_string()));
    }
    let recipients: Vec<Recipient> = recipients.into_iter().collect();
    let ct = envkey_crypto::encrypt(plaintext, &recipients)?;
    let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &ct);
    Ok(wrap_base64(&encoded))
}

fn decrypt_entry(entry: &SecretEntry, identity: &Identity) -> Result<envkey_crypto::Zeroizing<Vec<u8>>, EnvkeyError> {
    let raw = unwrap_base64(&entry.value);
    let ct = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, raw.as_bytes())
        .map_err(|_| EnvkeyError::Corrupt)?;
    Ok(envkey_crypto::decrypt(&ct, identity)?)
}

/// `set(env, key, plaintext, actor)` — §4.4.
pub fn set(
    file: &mut DocumentFile,
    env: &str,
    key: &str,
    plaintext: &[u8],
    actor: &Actor,
) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::Set, env)?;
    let value = encrypt_for(&file.doc, env, plaintext)?;

    let entry = SecretEntry {
        value,
        set_by: actor.member.name.clone(),
        modified: Utc::now(),
        kind: Some(SecretKind::String),
    };
    file.doc.environment_mut(env).insert(key.to_string(), entry);
    tracing::info!(env, key, actor = actor.member.name.as_str(), "secret set");
    Ok(())
}

/// `set` variant for file-valued secrets (`kind: file`), §4.6.
pub fn set_file(
    file: &mut DocumentFile,
    env: &str,
    key: &str,
    plaintext: &[u8],
    actor: &Actor,
) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::Set, env)?;
    let value = encrypt_for(&file.doc, env, plaintext)?;

    let entry = SecretEntry {
        value,
        set_by: actor.member.name.clone(),
        modified: Utc::now(),
        kind: Some(SecretKind::File),
    };
    file.doc.environment_mut(env).insert(key.to_string(), entry);
    Ok(())
}

/// `get(env, key, identity) -> plaintext` — §4.4.
pub fn get(
    file: &DocumentFile,
    env: &str,
    key: &str,
    actor: &Actor,
) -> Result<envkey_crypto::Zeroizing<Vec<u8>>, EnvkeyError> {
    access::can_perform(&actor.member, Operation::Get, env)?;
    let entry = file
        .doc
        .environment(env)
        .and_then(|e| e.get(key))
        .ok_or_else(|| EnvkeyError::NotFound { env: env.to_string(), key: key.to_string() })?;
    decrypt_entry(entry, actor.identity)
}

/// `rm(env, key, actor)` — policy check, no cryptographic work.
pub fn rm(file: &mut DocumentFile, env: &str, key: &str, actor: &Actor) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::Rm, env)?;
    let removed = file.doc.environment_mut(env).remove(key);
    if removed.is_none() {
        return Err(EnvkeyError::NotFound { env: env.to_string(), key: key.to_string() });
    }
    tracing::info!(env, key, actor = actor.member.name.as_str(), "secret removed");
    Ok(())
}

/// `rotate`, single secret, explicit new value.
pub fn rotate_value(
    file: &mut DocumentFile,
    env: &str,
    key: &str,
    new_plaintext: &[u8],
    actor: &Actor,
) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::Rotate, env)?;
    set(file, env, key, new_plaintext, actor)
}

/// `rotate --generate N`, single secret.
pub fn rotate_generate(file: &mut DocumentFile, env: &str, key: &str, n: usize, actor: &Actor) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::Rotate, env)?;
    let generated = envkey_crypto::generate_secret(n);
    set(file, env, key, generated.as_bytes(), actor)
}

/// `rotate --all` — refresh the encryption (fresh file key) of every entry
/// in every environment the actor can access, without changing plaintext.
pub fn rotate_all(file: &mut DocumentFile, actor: &Actor) -> Result<(), EnvkeyError> {
    let env_names: Vec<String> = file.doc.environments.keys().cloned().collect();
    for env in env_names {
        if !access::is_entitled(&actor.member, &env) {
            continue;
        }
        access::can_perform(&actor.member, Operation::Rotate, &env)?;
        reencrypt_environment(file, &env, actor)?;
    }
    Ok(())
}

/// Decrypt every entry of `env` with `actor`'s identity, then re-encrypt
/// each with a fresh file key to the current `recipient_set(env)`.
///
/// All decryptions complete before any ciphertext is overwritten, per §5's
/// ordering guarantee — a failure partway through leaves the document
/// untouched.
fn reencrypt_environment(file: &mut DocumentFile, env: &str, actor: &Actor) -> Result<(), EnvkeyError> {
    let entries: Vec<(String, SecretEntry)> = match file.doc.environment(env) {
        Some(e) => e.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        None => return Ok(()),
    };

    let mut decrypted = Vec::with_capacity(entries.len());
    for (key, entry) in &entries {
        let plaintext = decrypt_entry(entry, actor.identity)?;
        decrypted.push((key.clone(), entry.clone(), plaintext));
    }

    for (key, entry, plaintext) in decrypted {
        let value = encrypt_for(&file.doc, env, &plaintext)?;
        let updated = SecretEntry { value, modified: Utc::now(), ..entry };
        file.doc.environment_mut(env).insert(key, updated);
    }
    Ok(())
}

/// `member add(name, pubkey, role, environments?, actor)` — §4.4.
pub fn member_add(
    file: &mut DocumentFile,
    name: &str,
    pubkey: &str,
    role: Role,
    environments: Option<Vec<String>>,
    actor: &Actor,
) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::MemberManage, "")?;

    if file.doc.find_member(name).is_some() {
        return Err(EnvkeyError::NameInUse(name.to_string()));
    }
    let recipient = Recipient::parse(pubkey)?;
    if file.doc.team.iter().any(|m| m.pubkey == recipient.to_string()) {
        return Err(EnvkeyError::NameInUse(format!("pubkey already registered: {pubkey}")));
    }
    if role == Role::Ci && environments.as_ref().map(|e| e.is_empty()).unwrap_or(true) {
        return Err(EnvkeyError::DocumentInvariant("I6: ci member requires explicit environments".into()));
    }

    let new_member = Member {
        name: name.to_string(),
        pubkey: recipient.to_string(),
        role,
        added: Utc::now().date_naive(),
        environments: environments.clone(),
    };
    file.doc.team.push(new_member);

    let affected: Vec<String> = if role == Role::Admin {
        file.doc.environments.keys().cloned().collect()
    } else {
        environments.unwrap_or_else(|| vec![crate::model::DEFAULT_ENV.to_string()])
    };
    for env in &affected {
        if file.doc.environment(env).is_some() {
            reencrypt_environment(file, env, actor)?;
        }
    }
    tracing::info!(new_member = name, role = ?role, actor = actor.member.name.as_str(), "member added");
    Ok(())
}

/// `member rm(name, actor)` — §4.4.
///
/// Returns `Ok(())`; the caller is responsible for surfacing the
/// residual-exposure warning described in §4.4 item 4 to the user, since
/// warning display is a CLI-collaborator concern.
pub fn member_rm(file: &mut DocumentFile, name: &str, actor: &Actor) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::MemberManage, "")?;

    let target = file
        .doc
        .find_member(name)
        .ok_or_else(|| EnvkeyError::NotFound { env: String::new(), key: name.to_string() })?;

    if target.role == Role::Admin && file.doc.admin_count() <= 1 {
        return Err(EnvkeyError::LastAdmin);
    }

    let affected_envs: Vec<String> = if target.role == Role::Admin {
        file.doc.environments.keys().cloned().collect()
    } else {
        target.entitlement()
    };

    file.doc.team.retain(|m| m.name != name);

    for env in affected_envs {
        if file.doc.environment(&env).is_some() {
            reencrypt_environment(file, &env, actor)?;
        }
    }
    tracing::info!(removed = name, actor = actor.member.name.as_str(), "member removed");
    Ok(())
}

/// `member grant(name, env, actor)` — add `env` to a member's entitlement
/// set and re-key that environment.
pub fn member_grant(file: &mut DocumentFile, name: &str, env: &str, actor: &Actor) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::MemberManage, "")?;
    let m = file
        .doc
        .find_member_mut(name)
        .ok_or_else(|| EnvkeyError::NotFound { env: String::new(), key: name.to_string() })?;
    let mut envs = m.entitlement();
    if !envs.iter().any(|e| e == env) {
        envs.push(env.to_string());
    }
    m.environments = Some(envs);

    if file.doc.environment(env).is_some() {
        reencrypt_environment(file, env, actor)?;
    }
    Ok(())
}

/// `member revoke(name, env, actor)` — remove `env` from a member's
/// entitlement set and re-key that environment.
pub fn member_revoke(file: &mut DocumentFile, name: &str, env: &str, actor: &Actor) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::MemberManage, "")?;
    let m = file
        .doc
        .find_member_mut(name)
        .ok_or_else(|| EnvkeyError::NotFound { env: String::new(), key: name.to_string() })?;
    let mut envs = m.entitlement();
    envs.retain(|e| e != env);
    m.environments = Some(envs);

    if file.doc.environment(env).is_some() {
        reencrypt_environment(file, env, actor)?;
    }
    Ok(())
}

/// `member update(name, new_pubkey, actor)` — replace pubkey in place and
/// re-encrypt every environment the member has access to.
pub fn member_update(file: &mut DocumentFile, name: &str, new_pubkey: &str, actor: &Actor) -> Result<(), EnvkeyError> {
    access::can_perform(&actor.member, Operation::MemberManage, "")?;
    let new_recipient = Recipient::parse(new_pubkey)?;

    let (role, entitlement) = {
        let m = file
            .doc
            .find_member_mut(name)
            .ok_or_else(|| EnvkeyError::NotFound { env: String::new(), key: name.to_string() })?;
        m.pubkey = new_recipient.to_string();
        (m.role, m.entitlement())
    };

    let affected: Vec<String> = if role == Role::Admin {
        file.doc.environments.keys().cloned().collect()
    } else {
        entitlement
    };
    for env in affected {
        if file.doc.environment(&env).is_some() {
            reencrypt_environment(file, &env, actor)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify_file;

    fn admin_member(identity: &Identity, name: &str) -> Member {
        Member {
            name: name.to_string(),
            pubkey: identity.to_recipient().to_string(),
            role: Role::Admin,
            added: Utc::now().date_naive(),
            environments: None,
        }
    }

    fn fresh_doc_with_admin(name: &str) -> (DocumentFile, Identity) {
        let identity = Identity::generate();
        let mut file = DocumentFile::new_empty();
        file.doc.team.push(admin_member(&identity, name));
        (file, identity)
    }

    #[test]
    fn set_then_get_roundtrips() {
        let (mut file, identity) = fresh_doc_with_admin("alice");
        let member = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: member.clone(), identity: &identity };

        set(&mut file, "default", "DATABASE_URL", b"postgres://u:p@h/db", &actor).unwrap();
        let value = get(&file, "default", "DATABASE_URL", &actor).unwrap();
        assert_eq!(&value[..], b"postgres://u:p@h/db");
    }

    #[test]
    fn two_party_share() {
        let (mut file, alice_id) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let alice_actor = Actor { member: alice.clone(), identity: &alice_id };

        let bob_id = Identity::generate();
        member_add(&mut file, "bob", &bob_id.to_recipient().to_string(), Role::Member, None, &alice_actor).unwrap();

        set(&mut file, "default", "API_KEY", b"k-123", &alice_actor).unwrap();

        let bob = file.doc.find_member("bob").unwrap().clone();
        let bob_actor = Actor { member: bob.clone(), identity: &bob_id };
        let value = get(&file, "default", "API_KEY", &bob_actor).unwrap();
        assert_eq!(&value[..], b"k-123");
    }

    #[test]
    fn member_removal_revokes_decrypt_access() {
        let (mut file, alice_id) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let alice_actor = Actor { member: alice.clone(), identity: &alice_id };

        let bob_id = Identity::generate();
        member_add(&mut file, "bob", &bob_id.to_recipient().to_string(), Role::Member, None, &alice_actor).unwrap();
        set(&mut file, "default", "API_KEY", b"k-123", &alice_actor).unwrap();

        member_rm(&mut file, "bob", &alice_actor).unwrap();

        let bob = Member {
            name: "bob".to_string(),
            pubkey: bob_id.to_recipient().to_string(),
            role: Role::Member,
            added: Utc::now().date_naive(),
            environments: None,
        };
        let bob_actor = Actor { member: bob.clone(), identity: &bob_id };
        let err = get(&file, "default", "API_KEY", &bob_actor).unwrap_err();
        assert!(matches!(err, EnvkeyError::NotARecipient));
    }

    #[test]
    fn ci_environment_isolation() {
        let (mut file, alice_id) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let alice_actor = Actor { member: alice.clone(), identity: &alice_id };

        let ci_id = Identity::generate();
        member_add(
            &mut file,
            "ci-prod",
            &ci_id.to_recipient().to_string(),
            Role::Ci,
            Some(vec!["production".to_string()]),
            &alice_actor,
        )
        .unwrap();

        set(&mut file, "production", "DATABASE_URL", b"prod-db", &alice_actor).unwrap();
        set(&mut file, "default", "FOO", b"bar", &alice_actor).unwrap();

        let ci = file.doc.find_member("ci-prod").unwrap().clone();
        let ci_actor = Actor { member: ci.clone(), identity: &ci_id };

        // entitled environment: get succeeds.
        let value = get(&file, "production", "DATABASE_URL", &ci_actor).unwrap();
        assert_eq!(&value[..], b"prod-db");

        // ci was never granted "default": denied regardless of role.
        let err = get(&file, "default", "FOO", &ci_actor).unwrap_err();
        assert!(matches!(err, EnvkeyError::PolicyDenied(_)));

        // ci cannot set, even in an entitled environment.
        let err = set(&mut file, "production", "OTHER", b"x", &ci_actor).unwrap_err();
        assert!(matches!(err, EnvkeyError::PolicyDenied(_)));
    }

    #[test]
    fn rotate_generate_changes_value_and_timestamp() {
        let (mut file, identity) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: alice.clone(), identity: &identity };

        set(&mut file, "default", "API_KEY", b"old", &actor).unwrap();
        let before = file.doc.environment("default").unwrap().get("API_KEY").unwrap().clone();

        rotate_generate(&mut file, "default", "API_KEY", 32, &actor).unwrap();
        let after = file.doc.environment("default").unwrap().get("API_KEY").unwrap().clone();

        assert_ne!(before.value, after.value);
        assert!(after.modified >= before.modified);

        let new_plaintext = get(&file, "default", "API_KEY", &actor).unwrap();
        assert_ne!(&new_plaintext[..], b"old");
    }

    #[test]
    fn rotate_all_preserves_plaintext() {
        let (mut file, identity) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: alice.clone(), identity: &identity };

        set(&mut file, "default", "API_KEY", b"stable-value", &actor).unwrap();
        let before_ct = file.doc.environment("default").unwrap().get("API_KEY").unwrap().value.clone();

        rotate_all(&mut file, &actor).unwrap();

        let after_ct = file.doc.environment("default").unwrap().get("API_KEY").unwrap().value.clone();
        assert_ne!(before_ct, after_ct, "rotate --all must produce a fresh file key");

        let value = get(&file, "default", "API_KEY", &actor).unwrap();
        assert_eq!(&value[..], b"stable-value");
    }

    #[test]
    fn cannot_remove_sole_admin() {
        let (mut file, identity) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let actor = Actor { member: alice.clone(), identity: &identity };

        let err = member_rm(&mut file, "alice", &actor).unwrap_err();
        assert!(matches!(err, EnvkeyError::LastAdmin));
    }

    #[test]
    fn non_admin_cannot_manage_members() {
        let (mut file, _identity) = fresh_doc_with_admin("alice");
        let member_id = Identity::generate();
        let member_record = Member {
            name: "bob".to_string(),
            pubkey: member_id.to_recipient().to_string(),
            role: Role::Member,
            added: Utc::now().date_naive(),
            environments: None,
        };
        let actor = Actor { member: member_record.clone(), identity: &member_id };

        let err = member_add(&mut file, "carol", &Identity::generate().to_recipient().to_string(), Role::Member, None, &actor)
            .unwrap_err();
        assert!(matches!(err, EnvkeyError::PolicyDenied(_)));
    }

    #[test]
    fn member_add_rekeys_every_environment_for_a_new_admin() {
        let (mut file, alice_id) = fresh_doc_with_admin("alice");
        let alice = file.doc.find_member("alice").unwrap().clone();
        let alice_actor = Actor { member: alice.clone(), identity: &alice_id };

        set(&mut file, "default", "FOO", b"foo-value", &alice_actor).unwrap();
        set(&mut file, "production", "DATABASE_URL", b"prod-db", &alice_actor).unwrap();

        let bob_id = Identity::generate();
        member_add(&mut file, "bob", &bob_id.to_recipient().to_string(), Role::Admin, None, &alice_actor).unwrap();

        let bob = file.doc.find_member("bob").unwrap().clone();
        let bob_actor = Actor { member: bob.clone(), identity: &bob_id };

        // A freshly-added admin is a recipient of every environment, not
        // just "default" — including ones it was never told about.
        assert_eq!(&get(&file, "default", "FOO", &bob_actor).unwrap()[..], b"foo-value");
        assert_eq!(&get(&file, "production", "DATABASE_URL", &bob_actor).unwrap()[..], b"prod-db");

        let report = verify_file(&file).unwrap();
        assert!(report.is_clean());
    }

    // Property tests (§8 P4, P5): every document mutation that changes who
    // can decrypt an environment must re-key it completely, and plaintexts
    // must survive any re-key that doesn't revoke the reader.
    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn plaintext_strategy() -> impl Strategy<Value = Vec<u8>> {
            proptest::collection::vec(any::<u8>(), 0..64)
        }

        proptest! {
            // P4: member_add preserves the plaintext of secrets that already
            // existed in environments the new member doesn't touch.
            #[test]
            fn member_add_preserves_existing_plaintext(plaintext in plaintext_strategy()) {
                let (mut file, alice_id) = fresh_doc_with_admin("alice");
                let alice = file.doc.find_member("alice").unwrap().clone();
                let alice_actor = Actor { member: alice.clone(), identity: &alice_id };
                set(&mut file, "default", "KEY", &plaintext, &alice_actor).unwrap();

                let bob_id = Identity::generate();
                member_add(&mut file, "bob", &bob_id.to_recipient().to_string(), Role::Member, None, &alice_actor).unwrap();

                let after = get(&file, "default", "KEY", &alice_actor).unwrap();
                prop_assert_eq!(&after[..], &plaintext[..]);
            }

            // P4: member_grant/member_revoke/rotate_all all preserve the
            // plaintext for an identity entitled both before and after.
            #[test]
            fn member_grant_revoke_and_rotate_all_preserve_plaintext(plaintext in plaintext_strategy()) {
                let (mut file, alice_id) = fresh_doc_with_admin("alice");
                let alice = file.doc.find_member("alice").unwrap().clone();
                let alice_actor = Actor { member: alice.clone(), identity: &alice_id };
                set(&mut file, "default", "KEY", &plaintext, &alice_actor).unwrap();

                let bob_id = Identity::generate();
                member_add(
                    &mut file,
                    "bob",
                    &bob_id.to_recipient().to_string(),
                    Role::Member,
                    Some(vec!["staging".to_string()]),
                    &alice_actor,
                )
                .unwrap();

                member_grant(&mut file, "bob", "default", &alice_actor).unwrap();
                prop_assert_eq!(&get(&file, "default", "KEY", &alice_actor).unwrap()[..], &plaintext[..]);

                member_revoke(&mut file, "bob", "default", &alice_actor).unwrap();
                prop_assert_eq!(&get(&file, "default", "KEY", &alice_actor).unwrap()[..], &plaintext[..]);

                rotate_all(&mut file, &alice_actor).unwrap();
                prop_assert_eq!(&get(&file, "default", "KEY", &alice_actor).unwrap()[..], &plaintext[..]);
            }

            // P4: member_rm preserves the plaintext for members who survive
            // the removal.
            #[test]
            fn member_rm_preserves_plaintext_for_surviving_members(plaintext in plaintext_strategy()) {
                let (mut file, alice_id) = fresh_doc_with_admin("alice");
                let alice = file.doc.find_member("alice").unwrap().clone();
                let alice_actor = Actor { member: alice.clone(), identity: &alice_id };

                let bob_id = Identity::generate();
                member_add(&mut file, "bob", &bob_id.to_recipient().to_string(), Role::Member, None, &alice_actor).unwrap();
                set(&mut file, "default", "KEY", &plaintext, &alice_actor).unwrap();

                member_rm(&mut file, "bob", &alice_actor).unwrap();

                prop_assert_eq!(&get(&file, "default", "KEY", &alice_actor).unwrap()[..], &plaintext[..]);
            }

            // P5: after member_rm(X), no ciphertext in the document remains
            // decryptable by X's identity, for any plaintext that was
            // previously shared with X.
            #[test]
            fn member_rm_revokes_decrypt_access_to_every_secret(plaintext in plaintext_strategy()) {
                let (mut file, alice_id) = fresh_doc_with_admin("alice");
                let alice = file.doc.find_member("alice").unwrap().clone();
                let alice_actor = Actor { member: alice.clone(), identity: &alice_id };

                let bob_id = Identity::generate();
                member_add(&mut file, "bob", &bob_id.to_recipient().to_string(), Role::Member, None, &alice_actor).unwrap();
                set(&mut file, "default", "KEY_A", &plaintext, &alice_actor).unwrap();
                set(&mut file, "default", "KEY_B", b"unrelated", &alice_actor).unwrap();

                member_rm(&mut file, "bob", &alice_actor).unwrap();

                let bob = Member {
                    name: "bob".to_string(),
                    pubkey: bob_id.to_recipient().to_string(),
                    role: Role::Member,
                    added: Utc::now().date_naive(),
                    environments: None,
                };
                let bob_actor = Actor { member: bob.clone(), identity: &bob_id };

                for key in ["KEY_A", "KEY_B"] {
                    let err = get(&file, "default", key, &bob_actor).unwrap_err();
                    prop_assert!(matches!(err, EnvkeyError::NotARecipient));
                }
            }
        }
    }
}
