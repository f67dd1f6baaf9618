use std::collections::BTreeSet;

use envkey_crypto::Recipient;

use crate::error::EnvkeyError;
use crate::model::{Document, Role};

/// An operation subject to role-based access control, per the §4.3 table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Get,
    Set,
    Rm,
    Rotate,
    MemberManage,
    ReadOnly, // verify / diff / log
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::Rm => "rm",
            Operation::Rotate => "rotate",
            Operation::MemberManage => "member add/rm/grant/revoke",
            Operation::ReadOnly => "verify/diff/log",
        }
    }

    fn allowed_for(self, role: Role) -> bool {
        match (self, role) {
            (Operation::Get, _) => true, // entitlement gates which *env*, not whether at all
            (Operation::Set, r) => r.can_set(),
            (Operation::Rm, r) => r.can_rm(),
            (Operation::Rotate, r) => r.can_rotate(),
            (Operation::MemberManage, r) => r.can_manage_members(),
            (Operation::ReadOnly, r) => r.can_read_metadata(),
        }
    }
}

/// The derived set of recipients for environment `env`: every non-admin
/// member entitled to `env`, plus every admin (admins see all environments).
pub fn recipient_set(doc: &Document, env: &str) -> Result<BTreeSet<Recipient>, EnvkeyError> {
    let mut set = BTreeSet::new();
    for member in &doc.team {
        let entitled = member.role == Role::Admin || member.entitlement().iter().any(|e| e == env);
        if entitled {
            let recipient = Recipient::parse(&member.pubkey)
                .map_err(|e| EnvkeyError::DocumentInvariant(format!("member {}: {e}", member.name)))?;
            set.insert(recipient);
        }
    }
    Ok(set)
}

/// Whether `actor` (identified by team-member record) is entitled to `env`
/// at all — i.e. whether they appear in `recipient_set(env)`.
pub fn is_entitled(actor: &crate::model::Member, env: &str) -> bool {
    actor.role == Role::Admin || actor.entitlement().iter().any(|e| e == env)
}

/// Logical (non-cryptographic) permission check, performed *before* any
/// cryptographic work per §5's ordering guarantee.
pub fn can_perform(actor: &crate::model::Member, op: Operation, env: &str) -> Result<(), EnvkeyError> {
    if !op.allowed_for(actor.role) {
        return Err(EnvkeyError::PolicyDenied(op.label().to_string()));
    }
    if matches!(op, Operation::Get | Operation::Set | Operation::Rm | Operation::Rotate)
        && !is_entitled(actor, env)
    {
        return Err(EnvkeyError::PolicyDenied(op.label().to_string()));
    }
    Ok(())
}
